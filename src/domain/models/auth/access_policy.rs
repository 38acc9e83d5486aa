//! 라우트 접근 정책 정의
//!
//! 각 라우트가 어떤 인증 상태를 요구하는지를 선언하는 모델입니다.
//! 정책은 라우트 등록 시점에 한 번 구성되며 요청 처리 중에는 변하지 않습니다.

use serde::{Deserialize, Serialize};

/// 사용자 역할
///
/// 닫힌 역할 집합입니다. 저장소에는 소문자 문자열로 기록됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// 관리자
    Admin,
    /// 일반 사용자
    User,
}

/// 라우트 접근 정책
///
/// 인증 가드가 요청마다 평가하는 선언적 접근 규칙입니다.
///
/// * `public` - 토큰이 있으면 주체를 첨부하고, 없거나 유효하지 않아도 통과
/// * `unauthenticated_only` - 유효한 토큰을 가진 요청을 거부 (로그인/가입 경로)
/// * `required_roles` - 비어 있으면 인증만 요구, 비어 있지 않으면 OR 조건 역할 검사
/// * `require_verified` - 이메일 인증 완료된 주체만 허용
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    pub public: bool,
    pub unauthenticated_only: bool,
    pub required_roles: Vec<Role>,
    pub require_verified: bool,
}

impl AccessPolicy {
    /// 인증된 주체만 허용하는 정책
    pub fn protected() -> Self {
        Self {
            public: false,
            unauthenticated_only: false,
            required_roles: Vec::new(),
            require_verified: false,
        }
    }

    /// 누구나 접근 가능한 정책 (주체가 있으면 첨부만)
    pub fn public() -> Self {
        Self {
            public: true,
            unauthenticated_only: false,
            required_roles: Vec::new(),
            require_verified: false,
        }
    }

    /// 미인증 상태에서만 접근 가능한 정책
    pub fn guest_only() -> Self {
        Self {
            public: false,
            unauthenticated_only: true,
            required_roles: Vec::new(),
            require_verified: false,
        }
    }

    /// 특정 역할을 요구하는 정책 (OR 조건)
    pub fn with_roles(roles: Vec<Role>) -> Self {
        Self {
            public: false,
            unauthenticated_only: false,
            required_roles: roles,
            require_verified: false,
        }
    }

    /// 이메일 인증 완료를 추가로 요구
    pub fn verified(mut self) -> Self {
        self.require_verified = true;
        self
    }

    /// 정책 조합의 유효성을 점검합니다.
    ///
    /// 라우트 등록 시점(서버 기동 시)에 호출됩니다. 공개 정책에 역할이
    /// 지정된 경우 역할은 무시되며 경고만 남깁니다.
    pub fn validate(&self) {
        if self.public && !self.required_roles.is_empty() {
            log::warn!(
                "공개 정책에 역할 {:?}이 지정되었습니다. 공개 라우트에서 역할은 무시됩니다",
                self.required_roles
            );
        }
        if self.unauthenticated_only && !self.required_roles.is_empty() {
            log::warn!("미인증 전용 정책의 역할 지정은 무시됩니다");
        }
    }

    /// 주체의 역할이 정책 요구사항을 만족하는지 확인
    ///
    /// 역할 목록이 비어 있으면 인증만으로 충분합니다.
    pub fn is_role_satisfied(&self, role: Role) -> bool {
        self.required_roles.is_empty() || self.required_roles.contains(&role)
    }
}
