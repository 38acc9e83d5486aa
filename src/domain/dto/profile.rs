//! 프로필 요청 DTO

use serde::Deserialize;
use validator::Validate;

/// 프로필 수정 요청 구조체
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 50, message = "표시 이름은 1-50자여야 합니다"))]
    pub display_name: Option<String>,

    #[validate(length(min = 3, max = 30, message = "사용자 이름은 3-30자여야 합니다"))]
    pub username: Option<String>,
}

/// 비밀번호 변경 요청 구조체
#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "현재 비밀번호를 입력해주세요"))]
    pub current_password: String,

    #[validate(length(min = 8, message = "새 비밀번호는 8자 이상이어야 합니다"))]
    pub new_password: String,
}
