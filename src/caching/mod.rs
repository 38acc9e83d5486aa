//! 캐싱 계층 모듈
//!
//! Redis를 백엔드로 하는 캐시 지원과 JSON 기반 객체 직렬화를 제공합니다.
//!
//! # 주의
//!
//! 인증 파이프라인의 사용자(Subject) 조회는 **캐싱하지 않습니다**.
//! 역할/인증 여부 플래그가 캐시로 인해 오래된 값으로 평가되면
//! 보안에 직접적인 영향을 주기 때문에, 캐싱 대상은 상품 조회 등
//! 보안과 무관한 읽기 경로로 한정합니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::caching::redis::RedisClient;
//!
//! let cache = RedisClient::connect(&config.redis).await?;
//! cache.set_with_expiry("products:list", &products, 300).await?;
//! let cached: Option<Vec<Product>> = cache.get("products:list").await?;
//! ```

pub mod redis;
