//! 인증 요청/응답 DTO
//!
//! 회원가입, 로그인 요청과 토큰 응답을 매핑합니다.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::dto::users::UserResponse;
use crate::domain::entities::users::user::User;
use crate::domain::models::auth::claims::TOKEN_TTL_SECS;

/// 회원가입 요청 구조체
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 3, max = 30, message = "사용자 이름은 3-30자여야 합니다"))]
    pub username: String,

    #[validate(length(min = 1, max = 50, message = "표시 이름은 1-50자여야 합니다"))]
    pub display_name: String,

    #[validate(length(min = 8, message = "비밀번호는 8자 이상이어야 합니다"))]
    pub password: String,
}

/// 로그인 요청 구조체
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

/// 로그인 응답 DTO (액세스 토큰 포함)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl LoginResponse {
    /// 새 로그인 응답 생성
    pub fn new(user: User, access_token: String) -> Self {
        Self {
            user: UserResponse::from(user),
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: TOKEN_TTL_SECS,
        }
    }
}

/// 회원가입 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub user: UserResponse,
    pub message: String,
}
