//! User Management HTTP Handlers
//!
//! 관리자 전용 사용자 관리 엔드포인트입니다.
//! 역할 검사는 가드에서 수행되므로 핸들러는 권한을 재확인하지 않습니다.

use actix_web::{delete, get, patch, web, HttpResponse};
use validator::Validate;

use crate::domain::dto::users::{ListUsersQuery, UpdateUserRequest, UserResponse};
use crate::errors::AppError;
use crate::services::users::user_service::UserService;

/// 사용자 목록 조회 핸들러
///
/// # Endpoint
/// `GET /api/v1/users?page={page}&limit={limit}`
#[get("")]
pub async fn list_users(
    users: web::Data<UserService>,
    query: web::Query<ListUsersQuery>,
) -> Result<HttpResponse, AppError> {
    let (items, total) = users.list_users(query.page(), query.limit()).await?;

    let responses: Vec<UserResponse> = items.into_iter().map(UserResponse::from).collect();

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "users": responses,
        "total": total,
        "page": query.page(),
        "limit": query.limit(),
    })))
}

/// 사용자 상세 조회 핸들러
///
/// # Endpoint
/// `GET /api/v1/users/{id}`
#[get("/{id}")]
pub async fn get_user(
    users: web::Data<UserService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let user = users.get_user(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// 사용자 정보 수정 핸들러
///
/// 역할 변경, 계정 활성화/비활성화, 이메일 인증 처리에 사용됩니다.
/// 변경 사항은 대상 사용자의 다음 요청부터 즉시 반영됩니다.
///
/// # Endpoint
/// `PATCH /api/v1/users/{id}`
#[patch("/{id}")]
pub async fn update_user(
    users: web::Data<UserService>,
    path: web::Path<i64>,
    payload: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let updated = users.update_user(path.into_inner(), payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(UserResponse::from(updated)))
}

/// 사용자 삭제 핸들러
///
/// # Endpoint
/// `DELETE /api/v1/users/{id}`
#[delete("/{id}")]
pub async fn delete_user(
    users: web::Data<UserService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    users.delete_user(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "사용자가 삭제되었습니다"
    })))
}
