//! 인증된 주체 모델과 요청 추출자
//!
//! 가드가 토큰 검증과 저장소 조회를 마친 뒤 요청 확장에 심어두는
//! 최소한의 사용자 표현과, 핸들러에서 이를 꺼내는 추출자입니다.

use std::future::{ready, Ready};

use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::models::auth::access_policy::Role;
use crate::errors::AppError;

/// 인증된 주체
///
/// 인증 파이프라인이 필요로 하는 최소한의 사용자 정보입니다.
/// 전체 사용자 엔티티 대신 이 표현만 요청에 첨부됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    /// 사용자 고유 ID
    pub id: i64,
    /// 사용자 역할
    pub role: Role,
    /// 이메일 인증 여부
    pub verified: bool,
}

/// 주체 저장소 추상화
///
/// 가드는 이 트레이트를 통해서만 사용자 저장소에 접근합니다.
/// 조회 결과는 캐싱하지 않습니다. 역할 변경과 계정 비활성화가
/// 다음 요청부터 즉시 반영되어야 하기 때문입니다.
#[async_trait]
pub trait SubjectStore: Send + Sync {
    /// ID로 주체를 조회합니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(Some(Subject))` - 활성 사용자 존재
    /// * `Ok(None)` - 사용자가 없거나 비활성화됨
    /// * `Err(AppError)` - 저장소 접근 실패
    async fn find_subject(&self, id: i64) -> Result<Option<Subject>, AppError>;
}

/// 가드를 통과한 요청에서 주체를 꺼내는 추출자
///
/// 보호된 라우트의 핸들러 시그니처에 선언하여 사용합니다.
/// 가드가 주체를 첨부하지 않은 요청에서는 401을 반환합니다.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Subject);

impl AuthenticatedUser {
    pub fn id(&self) -> i64 {
        self.0.id
    }

    pub fn is_admin(&self) -> bool {
        self.0.role == Role::Admin
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<Subject>() {
            Some(subject) => ready(Ok(AuthenticatedUser(subject.clone()))),
            None => ready(Err(AppError::Unauthenticated("로그인이 필요합니다".to_string()).into())),
        }
    }
}

/// 복호화된 원본 토큰 추출자
///
/// 가드가 검증을 마친 뒤 첨부하는 내부 서명 토큰 문자열입니다.
/// 다운스트림 서비스에 토큰을 위임 전달해야 하는 핸들러에서 사용합니다.
#[derive(Debug, Clone)]
pub struct RawToken(pub String);

impl FromRequest for RawToken {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<RawToken>() {
            Some(token) => ready(Ok(token.clone())),
            None => ready(Err(AppError::Unauthenticated("로그인이 필요합니다".to_string()).into())),
        }
    }
}

/// 선택적 주체 추출자
///
/// 공개 라우트에서 사용합니다. 주체가 없어도 요청은 통과하며
/// `None`으로 전달됩니다.
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<Subject>);

impl FromRequest for OptionalUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let subject = req.extensions().get::<Subject>().cloned();
        ready(Ok(OptionalUser(subject)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_extractor_reads_attached_subject() {
        let req = TestRequest::default().to_http_request();
        req.extensions_mut().insert(Subject {
            id: 3,
            role: Role::Admin,
            verified: true,
        });

        let user = AuthenticatedUser::extract(&req).await.unwrap();
        assert_eq!(user.id(), 3);
        assert!(user.is_admin());
    }

    #[actix_web::test]
    async fn test_extractor_rejects_missing_subject() {
        let req = TestRequest::default().to_http_request();
        assert!(AuthenticatedUser::extract(&req).await.is_err());
    }

    #[actix_web::test]
    async fn test_raw_token_extractor_reads_attached_token() {
        let req = TestRequest::default().to_http_request();
        req.extensions_mut().insert(RawToken("inner-jws".to_string()));

        let token = RawToken::extract(&req).await.unwrap();
        assert_eq!(token.0, "inner-jws");
    }

    #[actix_web::test]
    async fn test_raw_token_extractor_rejects_missing_token() {
        let req = TestRequest::default().to_http_request();
        assert!(RawToken::extract(&req).await.is_err());
    }

    #[actix_web::test]
    async fn test_optional_extractor_allows_missing_subject() {
        let req = TestRequest::default().to_http_request();
        let user = OptionalUser::extract(&req).await.unwrap();
        assert!(user.0.is_none());
    }
}
