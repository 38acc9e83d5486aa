//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! 백엔드 서비스를 위한 통합 에러 처리 시스템입니다.
//! `thiserror`와 `actix_web::ResponseError`를 사용하여 타입 안전하고
//! 일관된 에러 처리를 제공합니다.
//!
//! ## 인증/인가 에러 분류
//!
//! | 에러 | HTTP 상태 | 의미 |
//! |------|-----------|------|
//! | `Unauthenticated` | 401 | 토큰 없음/무효/만료, 미인증 계정, 계정 없음 |
//! | `AlreadyAuthenticated` | 401 | 비로그인 전용 라우트에 유효한 토큰으로 접근 |
//! | `PermissionDenied` | 403 | 역할 불일치 |
//! | `ServiceUnavailable` | 503 | 사용자 저장소 조회 실패/타임아웃 (재시도 가능한 유일한 케이스) |
//!
//! 토큰이 왜 무효한지(복호화 실패/서명 불일치/만료)는 서버 로그에만 남기고,
//! 클라이언트에게는 동일한 일반 메시지를 전달합니다.

use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// 백엔드 서비스에서 발생할 수 있는 모든 종류의 에러를 포괄하는 열거형입니다.
/// 자동으로 HTTP 응답으로 변환되어 클라이언트에게 전달됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 인증 실패 에러 (401 Unauthorized)
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// 비로그인 전용 라우트에 인증된 상태로 접근 (401 Unauthorized)
    #[error("Already authenticated: {0}")]
    AlreadyAuthenticated(String),

    /// 권한 부족 에러 (403 Forbidden)
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// 외부 저장소 조회 실패/타임아웃 (503 Service Unavailable)
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 리소스 찾을 수 없음 에러 (404 Not Found)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 충돌/중복 에러 (409 Conflict)
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 데이터베이스 관련 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Redis 캐시 관련 에러 (500 Internal Server Error)
    #[error("Redis error: {0}")]
    RedisError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            AppError::AlreadyAuthenticated(_) => StatusCode::UNAUTHORIZED,
            AppError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 각 에러 타입을 적절한 HTTP 상태 코드와 JSON 응답으로 변환합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        actix_web::HttpResponse::build(self.status_code())
            .json(serde_json::json!({
                "error": self.error_code(),
                "message": self.client_message(),
            }))
    }
}

impl AppError {
    /// 클라이언트 응답에 포함할 기계 판독용 에러 코드
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Unauthenticated(_) => "authentication_required",
            AppError::AlreadyAuthenticated(_) => "already_authenticated",
            AppError::PermissionDenied(_) => "insufficient_permissions",
            AppError::ServiceUnavailable(_) => "service_unavailable",
            AppError::ValidationError(_) => "validation_failed",
            AppError::NotFound(_) => "not_found",
            AppError::ConflictError(_) => "conflict",
            AppError::DatabaseError(_) => "internal_error",
            AppError::RedisError(_) => "internal_error",
            AppError::InternalError(_) => "internal_error",
        }
    }

    /// 클라이언트에게 전달할 메시지
    ///
    /// 내부 에러 계열은 상세 내용을 숨기고 일반 메시지로 대체합니다.
    pub fn client_message(&self) -> String {
        match self {
            AppError::DatabaseError(_) | AppError::RedisError(_) | AppError::InternalError(_) => {
                "내부 서버 오류가 발생했습니다".to_string()
            }
            AppError::Unauthenticated(msg)
            | AppError::AlreadyAuthenticated(msg)
            | AppError::PermissionDenied(msg)
            | AppError::ServiceUnavailable(msg)
            | AppError::ValidationError(msg)
            | AppError::NotFound(msg)
            | AppError::ConflictError(msg) => msg.clone(),
        }
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;
    use actix_web::http::StatusCode;

    #[test]
    fn test_unauthenticated_is_401() {
        let error = AppError::Unauthenticated("로그인이 필요합니다".to_string());
        assert_eq!(error.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_already_authenticated_is_401() {
        let error = AppError::AlreadyAuthenticated("이미 로그인된 상태입니다".to_string());
        assert_eq!(error.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_permission_denied_is_403() {
        let error = AppError::PermissionDenied("접근 권한이 부족합니다".to_string());
        assert_eq!(error.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_service_unavailable_is_503() {
        let error = AppError::ServiceUnavailable("저장소 조회 실패".to_string());
        assert_eq!(error.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_validation_error_is_400() {
        let error = AppError::ValidationError("이메일 형식이 올바르지 않습니다".to_string());
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_internal_errors_hide_details() {
        let error = AppError::DatabaseError("connection refused to mongodb://...".to_string());
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!error.client_message().contains("mongodb"));
    }

    #[test]
    fn test_error_response_status_matches() {
        let error = AppError::NotFound("상품을 찾을 수 없습니다".to_string());
        let response = error.error_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
