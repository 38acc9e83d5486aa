//! 서버/데이터 스토어 설정
//!
//! 프로세스 시작 시 환경 변수에서 한 번 로드되는 불변 설정 구조체들입니다.

use std::env;

use crate::config::auth_config::AuthConfig;
use crate::errors::errors::AppError;

/// HTTP 서버 바인딩 설정
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// 바인딩할 호스트 (기본값: 127.0.0.1)
    pub host: String,
    /// 바인딩할 포트 (기본값: 8080)
    pub port: u16,
    /// 워커 스레드 수 (기본값: 4)
    pub workers: usize,
}

impl ServerConfig {
    fn from_env() -> Result<Self, AppError> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .map_err(|e| AppError::InternalError(format!("PORT 파싱 실패: {}", e)))?;
        let workers = env::var("WORKERS")
            .unwrap_or_else(|_| "4".to_string())
            .parse::<usize>()
            .map_err(|e| AppError::InternalError(format!("WORKERS 파싱 실패: {}", e)))?;

        Ok(Self { host, port, workers })
    }

    /// `host:port` 형식의 바인딩 주소
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// MongoDB 연결 설정
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// MongoDB 연결 URI
    pub uri: String,
    /// 사용할 데이터베이스 이름
    pub database_name: String,
}

impl DatabaseConfig {
    fn from_env() -> Self {
        Self {
            uri: env::var("MONGODB_URI")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            database_name: env::var("DATABASE_NAME")
                .unwrap_or_else(|_| "api_starter_dev".to_string()),
        }
    }
}

/// Redis 연결 설정
#[derive(Debug, Clone)]
pub struct RedisConfig {
    /// Redis 연결 URL
    pub url: String,
}

impl RedisConfig {
    fn from_env() -> Self {
        Self {
            url: env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
        }
    }
}

/// Rate Limiting 설정
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// 초당 허용 요청 수 (기본값: 100)
    pub per_second: u64,
    /// 버스트 허용량 (기본값: 200)
    pub burst_size: u32,
}

impl RateLimitConfig {
    fn from_env() -> Self {
        let per_second = env::var("RATE_LIMIT_PER_SECOND")
            .unwrap_or_else(|_| "100".to_string())
            .parse::<u64>()
            .unwrap_or_else(|e| {
                log::error!("RATE_LIMIT_PER_SECOND 파싱 실패: {}. 기본값 100 사용", e);
                100
            });

        let burst_size = env::var("RATE_LIMIT_BURST_SIZE")
            .unwrap_or_else(|_| "200".to_string())
            .parse::<u32>()
            .unwrap_or_else(|e| {
                log::error!("RATE_LIMIT_BURST_SIZE 파싱 실패: {}. 기본값 200 사용", e);
                200
            });

        Self { per_second, burst_size }
    }
}

/// 프로세스 전역 애플리케이션 설정
///
/// main에서 한 번 생성된 뒤 변경되지 않습니다.
/// 각 컴포넌트는 이 구조체의 일부를 생성자 인자로 전달받습니다.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub rate_limit: RateLimitConfig,
    pub auth: AuthConfig,
}

impl AppConfig {
    /// 환경 변수에서 전체 설정을 로드합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 필수 설정값 파싱 실패 또는 잘못된 비밀키 형식
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env(),
            redis: RedisConfig::from_env(),
            rate_limit: RateLimitConfig::from_env(),
            auth: AuthConfig::from_env()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_address_format() {
        let config = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 9000,
            workers: 4,
        };
        assert_eq!(config.bind_address(), "0.0.0.0:9000");
    }
}
