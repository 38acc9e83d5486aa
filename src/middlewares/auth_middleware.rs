//! 인증 가드 미들웨어
//!
//! ActixWeb 요청 파이프라인에서 접근 정책을 평가하는 미들웨어입니다.
//! 토큰 추출, 복호화/검증, 주체 조회, 역할 검사를 한 곳에서 수행하며
//! 핸들러는 요청 확장에 첨부된 `Subject`만 사용합니다.

use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};

use crate::domain::models::auth::access_policy::{AccessPolicy, Role};
use crate::domain::models::auth::subject::SubjectStore;
use crate::middlewares::auth_inner::AuthGuardService;
use crate::services::auth::token_service::TokenService;

/// 가드가 요청마다 사용하는 공유 의존성
///
/// main에서 한 번 구성되어 `web::Data`로 등록됩니다.
#[derive(Clone)]
pub struct AuthContext {
    pub tokens: TokenService,
    pub subjects: Arc<dyn SubjectStore>,
}

impl AuthContext {
    pub fn new(tokens: TokenService, subjects: Arc<dyn SubjectStore>) -> Self {
        Self { tokens, subjects }
    }
}

/// 인증 가드 미들웨어
///
/// 라우트(또는 스코프)마다 하나의 정책을 선언합니다.
/// 정책은 라우트 등록 시점에 고정되며 요청 처리 중 변하지 않습니다.
pub struct AuthGuard {
    policy: AccessPolicy,
}

impl AuthGuard {
    pub fn new(policy: AccessPolicy) -> Self {
        Self { policy }
    }

    /// 인증된 주체만 허용
    pub fn protected() -> Self {
        Self::new(AccessPolicy::protected())
    }

    /// 누구나 접근 가능, 주체가 있으면 첨부
    pub fn public() -> Self {
        Self::new(AccessPolicy::public())
    }

    /// 미인증 상태에서만 접근 가능 (로그인/가입 경로)
    pub fn guest_only() -> Self {
        Self::new(AccessPolicy::guest_only())
    }

    /// 특정 역할 요구 (OR 조건)
    pub fn with_roles(roles: Vec<Role>) -> Self {
        Self::new(AccessPolicy::with_roles(roles))
    }

    /// 관리자 전용
    pub fn admin_only() -> Self {
        Self::with_roles(vec![Role::Admin])
    }

    /// 이메일 인증 완료를 추가로 요구
    pub fn verified(mut self) -> Self {
        self.policy = self.policy.verified();
        self
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthGuardService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        // 정책 조합 점검은 라우트 등록 시점에 한 번만 수행된다
        self.policy.validate();

        ready(Ok(AuthGuardService {
            service: Rc::new(service),
            policy: self.policy.clone(),
        }))
    }
}
