//! 사용자 응답/관리 DTO

use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::users::user::User;
use crate::domain::models::auth::access_policy::Role;

/// 사용자 응답 DTO
///
/// 비밀번호 해시는 절대 포함하지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub display_name: String,
    pub role: Role,
    pub is_active: bool,
    pub is_email_verified: bool,
    pub last_login_at: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let User {
            id,
            email,
            username,
            display_name,
            role,
            is_active,
            is_email_verified,
            last_login_at,
            created_at,
            updated_at,
            ..
        } = user;

        Self {
            id,
            email,
            username,
            display_name,
            role,
            is_active,
            is_email_verified,
            last_login_at,
            created_at,
            updated_at,
        }
    }
}

/// 관리자용 사용자 수정 요청 구조체
///
/// 지정된 필드만 갱신됩니다.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 50, message = "표시 이름은 1-50자여야 합니다"))]
    pub display_name: Option<String>,

    /// 역할 변경 (다음 요청부터 즉시 반영됨)
    pub role: Option<Role>,

    /// 계정 활성화/비활성화
    pub is_active: Option<bool>,

    /// 이메일 인증 여부 수동 설정
    pub is_email_verified: Option<bool>,
}

/// 사용자 목록 조회 쿼리 파라미터
#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    /// 페이지 번호 (1부터 시작)
    pub page: Option<u64>,
    /// 페이지 크기 (기본값 20, 최대 100)
    pub limit: Option<i64>,
}

impl ListUsersQuery {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(20).clamp(1, 100)
    }
}
