//! Authentication HTTP Handlers
//!
//! 회원가입과 로그인 엔드포인트를 처리하는 핸들러 함수들입니다.
//! 두 엔드포인트 모두 비로그인 전용 라우트로, 유효한 토큰을 가진
//! 요청은 가드 단계에서 거부됩니다.

use actix_web::{post, web, HttpResponse};
use validator::Validate;

use crate::domain::dto::auth::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use crate::domain::dto::users::UserResponse;
use crate::errors::AppError;
use crate::services::users::user_service::UserService;

/// 회원가입 핸들러
///
/// # Endpoint
/// `POST /api/v1/auth/register`
#[post("/register")]
pub async fn register(
    users: web::Data<UserService>,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let user = users.register(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(RegisterResponse {
        user: UserResponse::from(user),
        message: "회원가입이 완료되었습니다".to_string(),
    }))
}

/// 로그인 핸들러
///
/// 이메일/비밀번호 검증 후 새 액세스 토큰을 발급합니다.
///
/// # Endpoint
/// `POST /api/v1/auth/login`
#[post("/login")]
pub async fn login(
    users: web::Data<UserService>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let email = payload.email.clone();
    let (user, token) = users.login(payload.into_inner()).await?;

    log::info!("로그인 성공: {} (id={})", email, user.id);

    Ok(HttpResponse::Ok().json(LoginResponse::new(user, token)))
}
