//! User Entity Implementation
//!
//! 사용자 엔티티의 핵심 구현체입니다.
//! 이메일/패스워드 기반 로컬 인증 사용자 모델을 제공합니다.

use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

use crate::domain::models::auth::access_policy::Role;
use crate::domain::models::auth::subject::Subject;

/// 사용자 엔티티
///
/// 시스템의 모든 사용자를 표현하는 핵심 도메인 엔티티입니다.
/// `_id`는 카운터 컬렉션에서 발급되는 순차 정수입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// 사용자 고유 ID (순차 발급 정수)
    #[serde(rename = "_id")]
    pub id: i64,
    /// 사용자 이메일 (unique)
    pub email: String,
    /// 사용자 이름 (unique)
    pub username: String,
    /// 표시 이름
    pub display_name: String,
    /// 해시된 비밀번호
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    /// 사용자 역할
    pub role: Role,
    /// 계정 활성화 여부
    pub is_active: bool,
    /// 이메일 인증 여부
    pub is_email_verified: bool,
    /// 마지막 로그인 시간
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<DateTime>,
    /// 생성 시간
    pub created_at: DateTime,
    /// 수정 시간
    pub updated_at: DateTime,
}

impl User {
    /// 새 사용자 생성 (이메일/패스워드)
    ///
    /// 이메일 인증이 필요한 상태로 시작됩니다.
    pub fn new(
        id: i64,
        email: String,
        username: String,
        display_name: String,
        password_hash: String,
    ) -> Self {
        let now = DateTime::now();

        Self {
            id,
            email,
            username,
            display_name,
            password_hash: Some(password_hash),
            role: Role::User,
            is_active: true,
            is_email_verified: false,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// 비밀번호 인증이 가능한 사용자인지 확인
    pub fn can_authenticate_with_password(&self) -> bool {
        self.is_active && self.password_hash.is_some()
    }

    /// 관리자 권한을 보유하고 있는지 확인
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// 인증 파이프라인에서 사용하는 최소 표현으로 변환
    pub fn to_subject(&self) -> Subject {
        Subject {
            id: self.id,
            role: self.role,
            verified: self.is_email_verified,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_starts_unverified() {
        let user = User::new(
            1,
            "a@b.com".to_string(),
            "alice".to_string(),
            "Alice".to_string(),
            "$2b$12$hash".to_string(),
        );
        assert!(!user.is_email_verified);
        assert!(user.is_active);
        assert_eq!(user.role, Role::User);
    }

    #[test]
    fn test_to_subject_carries_role_and_verification() {
        let mut user = User::new(
            7,
            "a@b.com".to_string(),
            "alice".to_string(),
            "Alice".to_string(),
            "$2b$12$hash".to_string(),
        );
        user.role = Role::Admin;
        user.is_email_verified = true;

        let subject = user.to_subject();
        assert_eq!(subject.id, 7);
        assert_eq!(subject.role, Role::Admin);
        assert!(subject.verified);
    }
}
