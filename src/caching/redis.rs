//! # Redis 캐시 클라이언트 구현
//!
//! Redis를 백엔드로 하는 캐시 클라이언트를 제공합니다.
//! 멀티플렉싱된 비동기 연결을 사용하며, Serde를 통한 투명한
//! JSON 직렬화/역직렬화를 지원합니다.

use log::info;
use redis::{AsyncCommands, Client};
use serde::{Serialize, de::DeserializeOwned};

use crate::config::app_config::RedisConfig;

/// Redis 캐시 클라이언트 래퍼
///
/// Redis 서버와의 상호작용을 추상화합니다.
/// 내부적으로 멀티플렉싱을 사용하여 단일 TCP 연결에서
/// 여러 동시 요청을 효율적으로 처리합니다.
#[derive(Clone)]
pub struct RedisClient {
    client: Client,
}

impl RedisClient {
    /// 설정값으로 새 Redis 클라이언트를 생성합니다.
    ///
    /// 생성 시 PING 명령으로 서버 가용성을 확인합니다.
    pub async fn connect(config: &RedisConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let client = Client::open(config.url.as_str())?;

        let mut conn = client.get_multiplexed_async_connection().await?;
        redis::cmd("PING").query_async::<()>(&mut conn).await?;

        info!("✅ Redis 연결 성공");

        Ok(Self { client })
    }

    /// 지정된 키에서 값을 조회합니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(Some(T))` - 키가 존재하고 역직렬화 성공
    /// * `Ok(None)` - 키가 존재하지 않음
    /// * `Err(RedisError)` - Redis 오류 또는 역직렬화 실패
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let value: Option<String> = conn.get(key).await?;

        match value {
            Some(json) => {
                let deserialized = serde_json::from_str(&json).map_err(|e| {
                    redis::RedisError::from((
                        redis::ErrorKind::TypeError,
                        "Deserialization failed",
                        e.to_string(),
                    ))
                })?;
                Ok(Some(deserialized))
            }
            None => Ok(None),
        }
    }

    /// 만료 시간과 함께 값을 저장합니다.
    ///
    /// # 인자
    ///
    /// * `key` - 저장할 Redis 키
    /// * `value` - 저장할 값 (JSON 직렬화됨)
    /// * `seconds` - 만료 시간 (초 단위)
    pub async fn set_with_expiry<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        seconds: u64,
    ) -> Result<(), redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let json = serde_json::to_string(value).map_err(|e| {
            redis::RedisError::from((
                redis::ErrorKind::TypeError,
                "Serialization failed",
                e.to_string(),
            ))
        })?;
        conn.set_ex(key, json, seconds).await
    }

    /// 지정된 키를 삭제합니다.
    ///
    /// 키가 존재하지 않아도 성공으로 처리됩니다.
    pub async fn del(&self, key: &str) -> Result<(), redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.del::<_, ()>(key).await
    }
}
