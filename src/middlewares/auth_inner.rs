//! 인증 가드의 핵심 평가 로직
//!
//! 요청마다 접근 정책을 다음 순서로 평가합니다.
//!
//! 1. Authorization 헤더에서 Bearer 토큰 추출
//! 2. 토큰 복호화 및 서명/만료 검증
//! 3. 주체 저장소 조회 (요청당 정확히 한 번, 캐시 없음)
//! 4. 이메일 인증/역할 검사
//!
//! 공개 정책은 어떤 단계가 실패해도 요청을 거부하지 않고
//! 익명으로 통과시킵니다. 토큰 실패의 상세 사유는 서버 로그에만 남습니다.

use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{web, Error, HttpMessage, ResponseError};
use futures_util::future::LocalBoxFuture;

use crate::domain::models::auth::access_policy::AccessPolicy;
use crate::domain::models::auth::subject::{RawToken, Subject};
use crate::errors::AppError;
use crate::middlewares::auth_middleware::AuthContext;
use crate::services::auth::token_service::TokenService;

/// 실제 정책 평가를 수행하는 서비스
pub struct AuthGuardService<S> {
    pub service: Rc<S>,
    pub policy: AccessPolicy,
}

impl<S, B> Service<ServiceRequest> for AuthGuardService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let policy = self.policy.clone();

        Box::pin(async move {
            let Some(context) = req.app_data::<web::Data<AuthContext>>() else {
                log::error!("AuthContext가 등록되지 않았습니다. main의 구성 순서를 확인하세요");
                let err = AppError::InternalError("인증 컨텍스트 없음".to_string());
                return Ok(reject(req, &err));
            };
            let context = context.clone();

            match evaluate(&req, &policy, &context).await {
                Ok(Some((subject, raw_token))) => {
                    log::debug!("인증 성공: 주체 ID {}", subject.id);
                    let mut extensions = req.extensions_mut();
                    extensions.insert(subject);
                    extensions.insert(RawToken(raw_token));
                }
                Ok(None) => {
                    log::debug!("익명 요청 통과");
                }
                Err(err) => {
                    return Ok(reject(req, &err));
                }
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// 정책 위반 응답 생성
fn reject<B>(req: ServiceRequest, err: &AppError) -> ServiceResponse<EitherBody<B>> {
    let response = err.error_response();
    let (req, _) = req.into_parts();
    ServiceResponse::new(req, response).map_into_right_body()
}

/// 접근 정책 평가
///
/// # 반환값
///
/// * `Ok(Some((Subject, 복호화된 토큰)))` - 인증 성공, 요청에 첨부
/// * `Ok(None)` - 익명으로 통과
/// * `Err(AppError)` - 요청 거부
async fn evaluate(
    req: &ServiceRequest,
    policy: &AccessPolicy,
    context: &AuthContext,
) -> Result<Option<(Subject, String)>, AppError> {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok());

    // 공개 정책: 주체 첨부는 시도하되 어떤 실패로도 거부하지 않는다
    if policy.public {
        let Some(header) = auth_header else {
            return Ok(None);
        };
        let Ok(token) = TokenService::extract_bearer_token(header) else {
            return Ok(None);
        };
        let decoded = match context.tokens.decode_token(token) {
            Ok(decoded) => decoded,
            Err(reason) => {
                log::debug!("공개 라우트 토큰 무시: {}", reason);
                return Ok(None);
            }
        };
        return match context.subjects.find_subject(decoded.claims.sub).await {
            Ok(subject) => Ok(subject.map(|s| (s, decoded.token))),
            Err(e) => {
                log::warn!("공개 라우트 주체 조회 실패, 익명으로 진행: {}", e);
                Ok(None)
            }
        };
    }

    // 미인증 전용 정책: 유효한 토큰만 거부 사유가 된다 (저장소 조회 없음)
    if policy.unauthenticated_only {
        if let Some(header) = auth_header {
            if let Ok(token) = TokenService::extract_bearer_token(header) {
                if context.tokens.decode_token(token).is_ok() {
                    return Err(AppError::AlreadyAuthenticated(
                        "이미 로그인된 상태입니다".to_string(),
                    ));
                }
            }
        }
        return Ok(None);
    }

    // 보호 정책: 전체 파이프라인 수행
    let header = auth_header
        .ok_or_else(|| AppError::Unauthenticated("로그인이 필요합니다".to_string()))?;

    let token = TokenService::extract_bearer_token(header).map_err(|reason| {
        log::warn!("인증 헤더 형식 오류: {}", reason);
        AppError::Unauthenticated("유효한 인증 토큰이 필요합니다".to_string())
    })?;

    let decoded = context.tokens.decode_token(token).map_err(|reason| {
        // 상세 사유는 서버 로그에만 남긴다
        log::warn!("토큰 검증 실패: {}", reason);
        AppError::Unauthenticated("유효한 인증 토큰이 필요합니다".to_string())
    })?;

    let subject = context
        .subjects
        .find_subject(decoded.claims.sub)
        .await
        .map_err(|e| {
            log::error!("주체 저장소 조회 실패: {}", e);
            AppError::ServiceUnavailable("잠시 후 다시 시도해주세요".to_string())
        })?
        .ok_or_else(|| AppError::Unauthenticated("계정을 찾을 수 없습니다".to_string()))?;

    if policy.require_verified && !subject.verified {
        return Err(AppError::Unauthenticated("이메일 인증이 필요합니다".to_string()));
    }

    if !policy.is_role_satisfied(subject.role) {
        log::warn!(
            "권한 부족: 주체 ID {} ({:?}), 필요 권한: {:?}",
            subject.id,
            subject.role,
            policy.required_roles
        );
        return Err(AppError::PermissionDenied("접근 권한이 부족합니다".to_string()));
    }

    Ok(Some((subject, decoded.token)))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{test, web, App, HttpResponse};
    use async_trait::async_trait;

    use crate::config::auth_config::AuthConfig;
    use crate::domain::models::auth::access_policy::Role;
    use crate::domain::models::auth::claims::TOKEN_TTL_SECS;
    use crate::domain::models::auth::subject::{OptionalUser, Subject, SubjectStore};
    use crate::middlewares::auth_middleware::AuthGuard;
    use crate::services::auth::token_service::TokenService;

    use super::*;

    /// 테스트용 인메모리 주체 저장소
    struct MemoryStore {
        subjects: HashMap<i64, Subject>,
        fail: bool,
    }

    impl MemoryStore {
        fn new(subjects: Vec<Subject>) -> Self {
            Self {
                subjects: subjects.into_iter().map(|s| (s.id, s)).collect(),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                subjects: HashMap::new(),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl SubjectStore for MemoryStore {
        async fn find_subject(&self, id: i64) -> Result<Option<Subject>, AppError> {
            if self.fail {
                return Err(AppError::DatabaseError("connection refused".to_string()));
            }
            Ok(self.subjects.get(&id).cloned())
        }
    }

    fn subject(id: i64, role: Role, verified: bool) -> Subject {
        Subject { id, role, verified }
    }

    fn tokens() -> TokenService {
        TokenService::new(&AuthConfig {
            signing_secret: "test-secret".to_string(),
            encryption_key: [9u8; 32],
            bcrypt_cost: 4,
        })
    }

    async fn echo(user: OptionalUser) -> HttpResponse {
        match user.0 {
            Some(subject) => HttpResponse::Ok().body(format!("subject:{}", subject.id)),
            None => HttpResponse::Ok().body("anonymous"),
        }
    }

    async fn echo_token(token: RawToken) -> HttpResponse {
        HttpResponse::Ok().body(token.0)
    }

    macro_rules! test_app {
        ($guard:expr, $store:expr, $tokens:expr) => {{
            let context = AuthContext::new($tokens, Arc::new($store));
            test::init_service(
                App::new().app_data(web::Data::new(context)).service(
                    web::resource("/t").wrap($guard).route(web::get().to(echo)),
                ),
            )
            .await
        }};
    }

    fn get(token: Option<&str>) -> test::TestRequest {
        let req = test::TestRequest::get().uri("/t");
        match token {
            Some(token) => req.insert_header(("Authorization", format!("Bearer {}", token))),
            None => req,
        }
    }

    #[actix_web::test]
    async fn test_protected_without_token_is_401() {
        let app = test_app!(
            AuthGuard::protected(),
            MemoryStore::new(vec![]),
            tokens()
        );

        let res = test::call_service(&app, get(None).to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_protected_with_valid_token_attaches_subject() {
        let tokens = tokens();
        let token = tokens.issue_token(1).unwrap();
        let app = test_app!(
            AuthGuard::protected(),
            MemoryStore::new(vec![subject(1, Role::User, true)]),
            tokens
        );

        let res = test::call_service(&app, get(Some(&token)).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);

        let body = test::read_body(res).await;
        assert_eq!(body, "subject:1");
    }

    #[actix_web::test]
    async fn test_protected_route_attaches_decrypted_inner_token() {
        let tokens = tokens();
        let wire = tokens.issue_token(1).unwrap();
        let inner = tokens.decode_token(&wire).unwrap().token;

        let context = AuthContext::new(
            tokens,
            Arc::new(MemoryStore::new(vec![subject(1, Role::User, true)])),
        );
        let app = test::init_service(
            App::new().app_data(web::Data::new(context)).service(
                web::resource("/t")
                    .wrap(AuthGuard::protected())
                    .route(web::get().to(echo_token)),
            ),
        )
        .await;

        let res = test::call_service(&app, get(Some(&wire)).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);

        // 핸들러에 전달되는 토큰은 와이어 형식이 아니라 복호화된 내부 토큰이다
        let body = test::read_body(res).await;
        assert_eq!(body, inner.as_str());
        assert_ne!(inner, wire);
    }

    #[actix_web::test]
    async fn test_protected_with_expired_token_is_401() {
        let tokens = tokens();
        let issued_at = chrono::Utc::now().timestamp() - TOKEN_TTL_SECS - 1;
        let token = tokens.issue_token_at(1, issued_at).unwrap();
        let app = test_app!(
            AuthGuard::protected(),
            MemoryStore::new(vec![subject(1, Role::User, true)]),
            tokens
        );

        let res = test::call_service(&app, get(Some(&token)).to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_protected_with_garbage_token_is_401() {
        let app = test_app!(
            AuthGuard::protected(),
            MemoryStore::new(vec![subject(1, Role::User, true)]),
            tokens()
        );

        let res = test::call_service(&app, get(Some("not-a-token")).to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_protected_with_unknown_subject_is_401() {
        let tokens = tokens();
        let token = tokens.issue_token(999).unwrap();
        let app = test_app!(AuthGuard::protected(), MemoryStore::new(vec![]), tokens);

        let res = test::call_service(&app, get(Some(&token)).to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_store_failure_is_503() {
        let tokens = tokens();
        let token = tokens.issue_token(1).unwrap();
        let app = test_app!(AuthGuard::protected(), MemoryStore::failing(), tokens);

        let res = test::call_service(&app, get(Some(&token)).to_request()).await;
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[actix_web::test]
    async fn test_admin_route_rejects_user_role() {
        let tokens = tokens();
        let token = tokens.issue_token(1).unwrap();
        let app = test_app!(
            AuthGuard::admin_only(),
            MemoryStore::new(vec![subject(1, Role::User, true)]),
            tokens
        );

        let res = test::call_service(&app, get(Some(&token)).to_request()).await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_admin_route_allows_admin_role() {
        let tokens = tokens();
        let token = tokens.issue_token(1).unwrap();
        let app = test_app!(
            AuthGuard::admin_only(),
            MemoryStore::new(vec![subject(1, Role::Admin, true)]),
            tokens
        );

        let res = test::call_service(&app, get(Some(&token)).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_verified_policy_rejects_unverified_subject() {
        let tokens = tokens();
        let token = tokens.issue_token(1).unwrap();
        let app = test_app!(
            AuthGuard::protected().verified(),
            MemoryStore::new(vec![subject(1, Role::User, false)]),
            tokens
        );

        let res = test::call_service(&app, get(Some(&token)).to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_public_route_passes_without_token() {
        let app = test_app!(AuthGuard::public(), MemoryStore::new(vec![]), tokens());

        let res = test::call_service(&app, get(None).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);

        let body = test::read_body(res).await;
        assert_eq!(body, "anonymous");
    }

    #[actix_web::test]
    async fn test_public_route_attaches_subject_when_token_valid() {
        let tokens = tokens();
        let token = tokens.issue_token(5).unwrap();
        let app = test_app!(
            AuthGuard::public(),
            MemoryStore::new(vec![subject(5, Role::User, true)]),
            tokens
        );

        let res = test::call_service(&app, get(Some(&token)).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);

        let body = test::read_body(res).await;
        assert_eq!(body, "subject:5");
    }

    #[actix_web::test]
    async fn test_public_route_never_rejects_invalid_token() {
        let app = test_app!(AuthGuard::public(), MemoryStore::new(vec![]), tokens());

        let res = test::call_service(&app, get(Some("garbage")).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);

        let body = test::read_body(res).await;
        assert_eq!(body, "anonymous");
    }

    #[actix_web::test]
    async fn test_public_route_degrades_on_store_failure() {
        let tokens = tokens();
        let token = tokens.issue_token(1).unwrap();
        let app = test_app!(AuthGuard::public(), MemoryStore::failing(), tokens);

        let res = test::call_service(&app, get(Some(&token)).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);

        let body = test::read_body(res).await;
        assert_eq!(body, "anonymous");
    }

    #[actix_web::test]
    async fn test_guest_only_passes_without_token() {
        let app = test_app!(AuthGuard::guest_only(), MemoryStore::new(vec![]), tokens());

        let res = test::call_service(&app, get(None).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_guest_only_rejects_valid_token() {
        let tokens = tokens();
        let token = tokens.issue_token(1).unwrap();
        let app = test_app!(
            AuthGuard::guest_only(),
            MemoryStore::new(vec![subject(1, Role::User, true)]),
            tokens
        );

        let res = test::call_service(&app, get(Some(&token)).to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["error"], "already_authenticated");
    }

    #[actix_web::test]
    async fn test_guest_only_passes_invalid_token() {
        let app = test_app!(AuthGuard::guest_only(), MemoryStore::new(vec![]), tokens());

        let res = test::call_service(&app, get(Some("expired-or-garbage")).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
    }
}
