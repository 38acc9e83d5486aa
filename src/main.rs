//! API 스타터 메인 애플리케이션
//!
//! Actix-web 기반의 HTTP 서버를 구동합니다.
//! 설정은 시작 시 한 번 로드되어 불변으로 유지되고, 모든 컴포넌트는
//! 여기서 명시적으로 생성되어 생성자 주입으로 연결됩니다.

use std::sync::Arc;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};

use api_starter_backend::caching::redis::RedisClient;
use api_starter_backend::config::AppConfig;
use api_starter_backend::db::Database;
use api_starter_backend::middlewares::AuthContext;
use api_starter_backend::repositories::products::product_repo::ProductRepository;
use api_starter_backend::repositories::users::user_repo::UserRepository;
use api_starter_backend::routes::configure_all_routes;
use api_starter_backend::services::auth::token_service::TokenService;
use api_starter_backend::services::products::product_service::ProductService;
use api_starter_backend::services::users::user_service::UserService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    load_env_file();
    init_logging();

    info!("🚀 API 스타터 백엔드 시작중...");

    // 설정은 여기서 한 번 로드되고 이후 변경되지 않는다
    let config = AppConfig::from_env().unwrap_or_else(|e| {
        error!("설정 로드 실패: {}", e);
        std::process::exit(1);
    });

    // 데이터 스토어 연결
    info!("📡 데이터베이스 연결 중...");
    let database = Database::connect(&config.database)
        .await
        .expect("데이터베이스 연결 실패");
    let redis = RedisClient::connect(&config.redis)
        .await
        .expect("Redis 연결 실패");

    // 컴포넌트 조립 (명시적 생성자 주입)
    let user_repo = UserRepository::new(&database);
    let product_repo = ProductRepository::new(&database, redis);

    if let Err(e) = user_repo.create_indexes().await {
        warn!("인덱스 생성 실패 (이미 존재할 수 있음): {}", e);
    }

    let token_service = TokenService::new(&config.auth);
    let user_service = UserService::new(user_repo.clone(), token_service.clone(), &config.auth);
    let product_service = ProductService::new(product_repo);
    let auth_context = AuthContext::new(token_service, Arc::new(user_repo));

    info!("✅ 모든 컴포넌트가 성공적으로 초기화되었습니다!");

    start_http_server(config, auth_context, user_service, product_service).await
}

/// HTTP 서버를 구성하고 실행합니다
async fn start_http_server(
    config: AppConfig,
    auth_context: AuthContext,
    user_service: UserService,
    product_service: ProductService,
) -> std::io::Result<()> {
    let bind_address = config.server.bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);

    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(config.rate_limit.per_second)
        .burst_size(config.rate_limit.burst_size)
        .use_headers()
        .finish()
        .expect("Rate Limiting 설정 오류");

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        config.rate_limit.per_second, config.rate_limit.burst_size
    );

    let workers = config.server.workers;

    HttpServer::new(move || {
        App::new()
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(configure_cors())
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            // 가드와 핸들러가 사용하는 공유 상태
            .app_data(web::Data::new(auth_context.clone()))
            .app_data(web::Data::new(user_service.clone()))
            .app_data(web::Data::new(product_service.clone()))
            .configure(configure_all_routes)
    })
    .bind(bind_address)?
    .workers(workers)
    .run()
    .await
}

/// 환경별 설정 파일을 로드합니다
///
/// PROFILE 환경변수에 따라 적절한 .env 파일을 로드합니다.
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    match profile.as_str() {
        "prod" => {
            if let Err(e) = dotenv::from_filename(".env.prod") {
                error!(".env.prod 파일 로드 실패: {}", e);
            }
        }
        "dev" => {
            if let Err(e) = dotenv::from_filename(".env.dev") {
                error!(".env.dev 파일 로드 실패: {}", e);
            }
        }
        _ => {
            dotenv().ok();
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// RUST_LOG 환경변수를 기반으로 로깅 레벨을 설정합니다.
/// 기본값은 info 레벨이며, actix_web은 debug 레벨로 설정됩니다.
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// CORS 설정을 구성합니다
///
/// 개발환경에서 로컬호스트 간 통신을 허용합니다.
fn configure_cors() -> Cors {
    Cors::default()
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_origin("http://localhost:8080")
        .allowed_origin("http://127.0.0.1:8080")
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .supports_credentials()
        .max_age(3600)
}
