//! 인증 관련 설정
//!
//! 토큰 서명 비밀키와 토큰 암호화 키를 관리합니다.
//! 두 키는 서로 독립적인 비밀값입니다. 하나가 유출되더라도
//! 나머지 하나만으로는 토큰을 위조할 수 없도록 분리되어 있습니다.
//!
//! ## 키 생성 예제
//!
//! ```bash
//! # 토큰 암호화 키 (AES-256, base64 인코딩된 32바이트)
//! export TOKEN_ENCRYPTION_KEY="$(openssl rand -base64 32)"
//!
//! # 서명 비밀키 (HMAC-SHA256)
//! export JWT_SIGNING_SECRET="$(openssl rand -base64 32)"
//! ```

use std::env;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::errors::errors::AppError;

/// AES-256 암호화 키 길이 (바이트)
pub const ENCRYPTION_KEY_LENGTH: usize = 32;

/// 개발 환경용 기본 암호화 키 (base64, 32바이트)
///
/// 환경 변수가 없을 때만 사용되며 사용 시 경고가 출력됩니다.
const DEV_ENCRYPTION_KEY: &str = "ZGV2LW9ubHktdG9rZW4ta2V5LWRvLW5vdC11c2UhISE=";

/// 인증 토큰 설정
///
/// 프로세스 시작 시 한 번 로드되어 프로세스 수명 동안 불변입니다.
/// 키 교체는 프로세스 재시작을 통해서만 가능합니다.
#[derive(Clone)]
pub struct AuthConfig {
    /// JWT 서명용 비밀키 (HMAC-SHA256)
    pub signing_secret: String,
    /// 토큰 암호화 키 (AES-256-GCM)
    pub encryption_key: [u8; ENCRYPTION_KEY_LENGTH],
    /// bcrypt 해싱 비용 (4-15)
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    /// 환경 변수에서 인증 설정을 로드합니다.
    ///
    /// # 환경 변수
    ///
    /// * `JWT_SIGNING_SECRET` - 서명 비밀키 (미설정 시 개발용 기본값 + 경고)
    /// * `TOKEN_ENCRYPTION_KEY` - base64 인코딩된 32바이트 암호화 키
    /// * `BCRYPT_COST` - bcrypt 비용 (기본값: 12)
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 암호화 키가 base64가 아니거나 32바이트가 아닌 경우
    pub fn from_env() -> Result<Self, AppError> {
        let signing_secret = env::var("JWT_SIGNING_SECRET").unwrap_or_else(|_| {
            log::warn!("JWT_SIGNING_SECRET not set, using default (not secure for production!)");
            "dev-only-signing-secret".to_string()
        });

        let key_base64 = env::var("TOKEN_ENCRYPTION_KEY").unwrap_or_else(|_| {
            log::warn!("TOKEN_ENCRYPTION_KEY not set, using default (not secure for production!)");
            DEV_ENCRYPTION_KEY.to_string()
        });
        let encryption_key = Self::decode_encryption_key(&key_base64)?;

        let bcrypt_cost = env::var("BCRYPT_COST")
            .unwrap_or_else(|_| "12".to_string())
            .parse::<u32>()
            .unwrap_or(12);

        Ok(Self {
            signing_secret,
            encryption_key,
            bcrypt_cost,
        })
    }

    /// base64 문자열을 32바이트 AES-256 키로 디코딩합니다.
    fn decode_encryption_key(key_base64: &str) -> Result<[u8; ENCRYPTION_KEY_LENGTH], AppError> {
        let bytes = BASE64
            .decode(key_base64.trim())
            .map_err(|e| AppError::InternalError(format!("TOKEN_ENCRYPTION_KEY 디코딩 실패: {}", e)))?;

        if bytes.len() != ENCRYPTION_KEY_LENGTH {
            return Err(AppError::InternalError(format!(
                "TOKEN_ENCRYPTION_KEY는 {}바이트여야 합니다 (현재 {}바이트)",
                ENCRYPTION_KEY_LENGTH,
                bytes.len()
            )));
        }

        let mut key = [0u8; ENCRYPTION_KEY_LENGTH];
        key.copy_from_slice(&bytes);
        Ok(key)
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // 비밀키는 로그에 노출하지 않는다
        f.debug_struct("AuthConfig")
            .field("signing_secret", &"[REDACTED]")
            .field("encryption_key", &"[REDACTED]")
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_valid_key() {
        let key_base64 = BASE64.encode([7u8; 32]);
        let key = AuthConfig::decode_encryption_key(&key_base64).unwrap();
        assert_eq!(key, [7u8; 32]);
    }

    #[test]
    fn test_decode_rejects_wrong_length() {
        let short = BASE64.encode([0u8; 16]);
        assert!(AuthConfig::decode_encryption_key(&short).is_err());
    }

    #[test]
    fn test_decode_rejects_invalid_base64() {
        assert!(AuthConfig::decode_encryption_key("not-base64!!!").is_err());
    }

    #[test]
    fn test_default_dev_key_is_valid() {
        let key = AuthConfig::decode_encryption_key(DEV_ENCRYPTION_KEY).unwrap();
        assert_eq!(key.len(), ENCRYPTION_KEY_LENGTH);
    }

    #[test]
    fn test_debug_hides_secrets() {
        let config = AuthConfig {
            signing_secret: "top-secret".to_string(),
            encryption_key: [1u8; 32],
            bcrypt_cost: 12,
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("top-secret"));
        assert!(debug.contains("REDACTED"));
    }
}
