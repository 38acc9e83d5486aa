//! API 라우트 설정 모듈
//!
//! RESTful API 엔드포인트들을 기능별로 그룹화하여 제공합니다.
//! 각 스코프에는 인증 가드가 정확히 하나 선언되며, 정책은 라우트 등록
//! 시점에 고정됩니다. 가드가 없는 라우트는 인증을 전혀 보지 않습니다.
//!
//! # 정책 요약
//!
//! | 스코프 | 정책 |
//! |--------|------|
//! | `/api/v1/auth` | 비로그인 전용 (로그인 상태로 접근 시 401) |
//! | `/api/v1/me` | 인증 필요 |
//! | `/api/v1/profile` | 인증 + 이메일 인증 완료 필요 |
//! | `/api/v1/users` | 관리자 전용 |
//! | `/api/v1/products` | 공개 (토큰이 있으면 주체 첨부) |
//! | `/api/v1/admin/products` | 관리자 전용 |
//! | `/health` | 공개 |

use actix_web::web;
use serde_json::json;

use crate::domain::models::auth::access_policy::Role;
use crate::handlers;
use crate::middlewares::AuthGuard;

/// 모든 라우트를 설정합니다
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check);

    configure_auth_routes(cfg);
    configure_profile_routes(cfg);
    configure_user_routes(cfg);
    configure_product_routes(cfg);
}

/// 인증 관련 라우트를 설정합니다
///
/// 회원가입과 로그인은 비로그인 전용입니다. 이미 유효한 토큰을 가진
/// 요청은 가드가 401로 거부합니다.
fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/auth")
            .wrap(AuthGuard::guest_only())
            .service(handlers::auth::register)
            .service(handlers::auth::login),
    );
}

/// 본인 정보 관련 라우트를 설정합니다
fn configure_profile_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/me")
            .wrap(AuthGuard::protected())
            .service(handlers::profile::me),
    );

    // 프로필 변경은 이메일 인증을 마친 계정만 허용한다
    cfg.service(
        web::scope("/api/v1/profile")
            .wrap(AuthGuard::protected().verified())
            .service(handlers::profile::update_profile)
            .service(handlers::profile::change_password),
    );
}

/// 관리자용 사용자 관리 라우트를 설정합니다
fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/users")
            .wrap(AuthGuard::with_roles(vec![Role::Admin]))
            .service(handlers::users::list_users)
            .service(handlers::users::get_user)
            .service(handlers::users::update_user)
            .service(handlers::users::delete_user),
    );
}

/// 상품 라우트를 설정합니다
///
/// 읽기 경로는 공개, 쓰기 경로는 관리자 전용으로 분리되어 있습니다.
fn configure_product_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/products")
            .wrap(AuthGuard::public())
            .service(handlers::products::list_products)
            .service(handlers::products::get_product),
    );

    cfg.service(
        web::scope("/api/v1/admin/products")
            .wrap(AuthGuard::admin_only())
            .service(handlers::products::create_product)
            .service(handlers::products::update_product)
            .service(handlers::products::delete_product),
    );
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// 로드밸런서나 모니터링 시스템에서 서비스 상태를 확인하는 데 사용됩니다.
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "api_starter_backend",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
