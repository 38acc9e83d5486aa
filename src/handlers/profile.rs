//! Profile HTTP Handlers
//!
//! 로그인한 사용자 본인의 정보 조회/수정 엔드포인트입니다.
//! 주체는 가드가 요청에 첨부한 것을 추출자로 꺼내 사용합니다.

use actix_web::{get, patch, post, web, HttpResponse};
use validator::Validate;

use crate::domain::dto::profile::{ChangePasswordRequest, UpdateProfileRequest};
use crate::domain::dto::users::UserResponse;
use crate::domain::models::auth::subject::AuthenticatedUser;
use crate::errors::AppError;
use crate::services::users::user_service::UserService;

/// 현재 사용자 정보 조회 핸들러
///
/// # Endpoint
/// `GET /api/v1/me`
#[get("")]
pub async fn me(
    users: web::Data<UserService>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let current = users.get_user(user.id()).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(current)))
}

/// 프로필 수정 핸들러
///
/// # Endpoint
/// `PATCH /api/v1/profile`
#[patch("")]
pub async fn update_profile(
    users: web::Data<UserService>,
    user: AuthenticatedUser,
    payload: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let updated = users.update_profile(user.id(), payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(UserResponse::from(updated)))
}

/// 비밀번호 변경 핸들러
///
/// # Endpoint
/// `POST /api/v1/profile/password`
#[post("/password")]
pub async fn change_password(
    users: web::Data<UserService>,
    user: AuthenticatedUser,
    payload: web::Json<ChangePasswordRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    users.change_password(user.id(), payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "비밀번호가 변경되었습니다"
    })))
}
