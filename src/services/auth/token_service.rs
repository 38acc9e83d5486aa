//! 액세스 토큰 발급/검증 서비스 구현
//!
//! 토큰은 두 단계로 보호됩니다. 먼저 클레임을 HMAC-SHA256으로 서명하고,
//! 서명된 결과 전체를 AES-256-GCM으로 암호화합니다. 클라이언트는
//! 내부 구조를 볼 수 없는 불투명 문자열만 받습니다.
//!
//! 검증은 발급의 역순입니다: 복호화 → 서명 검증 → 만료 확인.
//! 앞 단계가 실패하면 뒤 단계는 실행되지 않으며, 실패 사유는
//! 서버 로그용으로만 구분됩니다.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use crate::config::auth_config::AuthConfig;
use crate::domain::models::auth::claims::AccessClaims;
use crate::errors::AppError;
use crate::services::auth::cipher_service::{CipherError, TokenCipher};

/// 토큰 검증 실패 사유
///
/// 검증 단계 순서대로 정의되어 있습니다. 클라이언트에게는 사유와 무관하게
/// 동일한 401 응답이 나가고, 사유는 서버 로그에만 기록됩니다.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenDecodeError {
    /// 와이어 형식 오류 (base64 아님, 너무 짧음, 내부 페이로드 손상)
    #[error("토큰 형식이 올바르지 않습니다")]
    Malformed,
    /// 복호화 실패 (변조되었거나 다른 암호화 키로 발급됨)
    #[error("토큰 복호화에 실패했습니다")]
    DecryptionFailed,
    /// 서명 검증 실패
    #[error("토큰 서명이 유효하지 않습니다")]
    SignatureInvalid,
    /// 만료된 토큰
    #[error("토큰이 만료되었습니다")]
    Expired,
}

/// 검증을 통과한 토큰
///
/// 복호화된 내부 토큰 문자열은 다운스트림에서 사용할 수 있도록
/// 클레임과 함께 보존됩니다.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAccess {
    pub claims: AccessClaims,
    /// 복호화된 서명 토큰 (와이어 형식이 아님)
    pub token: String,
}

/// 액세스 토큰 발급/검증 서비스
///
/// 서명 키와 암호화 키는 서로 독립적인 비밀값이며
/// 프로세스 시작 시 한 번 주입됩니다.
#[derive(Clone)]
pub struct TokenService {
    cipher: TokenCipher,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// 인증 설정으로 새 토큰 서비스를 생성합니다.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // 만료는 정확한 시각 기준으로 판정한다
        validation.leeway = 0;

        Self {
            cipher: TokenCipher::new(config.encryption_key),
            encoding_key: EncodingKey::from_secret(config.signing_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.signing_secret.as_bytes()),
            validation,
        }
    }

    /// 주체 ID로 새 액세스 토큰을 발급합니다.
    ///
    /// 만료 시각은 현재 시각 + 고정 TTL(7일)이며 호출자가 지정할 수 없습니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 서명 또는 암호화 실패
    pub fn issue_token(&self, subject_id: i64) -> Result<String, AppError> {
        self.issue_token_at(subject_id, Utc::now().timestamp())
    }

    /// 지정된 발급 시각으로 토큰을 발급합니다.
    ///
    /// 만료 경계 검증을 위해 분리되어 있습니다.
    pub(crate) fn issue_token_at(&self, subject_id: i64, issued_at: i64) -> Result<String, AppError> {
        let claims = AccessClaims::new(subject_id, issued_at);

        let signed = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("토큰 서명 실패: {}", e)))?;

        self.cipher.encrypt(signed.as_bytes())
    }

    /// 와이어 토큰을 검증하고 클레임을 반환합니다.
    ///
    /// 전 함수(total function)입니다. 어떤 입력이 와도 패닉 없이
    /// `Ok` 또는 구분된 실패 사유를 반환합니다.
    ///
    /// # 검증 순서
    ///
    /// 1. AES-256-GCM 복호화
    /// 2. HMAC-SHA256 서명 검증
    /// 3. 만료 확인
    pub fn decode_token(&self, wire_token: &str) -> Result<DecodedAccess, TokenDecodeError> {
        let decrypted = self.cipher.decrypt(wire_token).map_err(|e| match e {
            CipherError::InvalidFormat => TokenDecodeError::Malformed,
            CipherError::AuthenticationFailed => TokenDecodeError::DecryptionFailed,
        })?;

        let signed = String::from_utf8(decrypted).map_err(|_| TokenDecodeError::Malformed)?;

        let claims = decode::<AccessClaims>(&signed, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenDecodeError::Expired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    TokenDecodeError::SignatureInvalid
                }
                _ => TokenDecodeError::Malformed,
            })?;

        Ok(DecodedAccess { claims, token: signed })
    }

    /// Authorization 헤더에서 Bearer 토큰을 추출합니다.
    ///
    /// 스킴은 대소문자를 구분하지 않습니다. 스킴과 토큰 사이에는
    /// 공백이 정확히 하나여야 하며 토큰은 비어 있을 수 없습니다.
    pub fn extract_bearer_token(auth_header: &str) -> Result<&str, TokenDecodeError> {
        let (scheme, token) = auth_header
            .split_once(' ')
            .ok_or(TokenDecodeError::Malformed)?;

        if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() || token.contains(' ') {
            return Err(TokenDecodeError::Malformed);
        }

        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::auth::claims::TOKEN_TTL_SECS;

    fn config(signing: &str, key_byte: u8) -> AuthConfig {
        AuthConfig {
            signing_secret: signing.to_string(),
            encryption_key: [key_byte; 32],
            bcrypt_cost: 4,
        }
    }

    fn service() -> TokenService {
        TokenService::new(&config("test-secret", 1))
    }

    #[test]
    fn test_issue_decode_roundtrip() {
        let service = service();
        let token = service.issue_token(42).unwrap();
        let claims = service.decode_token(&token).unwrap().claims;

        assert_eq!(claims.sub, 42);
        assert_eq!(claims.exp, claims.iat + TOKEN_TTL_SECS);
    }

    #[test]
    fn test_wire_token_is_opaque() {
        let service = service();
        let token = service.issue_token(42).unwrap();

        // 서명된 JWS가 그대로 노출되면 안 된다
        assert!(!token.contains("eyJ"));
        assert!(!token.contains('.'));
    }

    #[test]
    fn test_issuance_is_nondeterministic() {
        let service = service();
        let first = service.issue_token_at(42, 1_700_000_000).unwrap();
        let second = service.issue_token_at(42, 1_700_000_000).unwrap();

        assert_ne!(first, second);
        assert_eq!(
            service.decode_token(&first).unwrap().claims,
            service.decode_token(&second).unwrap().claims
        );
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = service();
        let issued_at = Utc::now().timestamp() - TOKEN_TTL_SECS - 1;
        let token = service.issue_token_at(42, issued_at).unwrap();

        assert_eq!(service.decode_token(&token), Err(TokenDecodeError::Expired));
    }

    #[test]
    fn test_not_yet_expired_token_accepted() {
        let service = service();
        let issued_at = Utc::now().timestamp() - TOKEN_TTL_SECS + 60;
        let token = service.issue_token_at(42, issued_at).unwrap();

        assert!(service.decode_token(&token).is_ok());
    }

    #[test]
    fn test_wrong_signing_secret_rejected() {
        // 암호화 키는 같고 서명 키만 다른 경우
        let issuer = TokenService::new(&config("secret-a", 1));
        let verifier = TokenService::new(&config("secret-b", 1));

        let token = issuer.issue_token(42).unwrap();

        assert_eq!(
            verifier.decode_token(&token),
            Err(TokenDecodeError::SignatureInvalid)
        );
    }

    #[test]
    fn test_wrong_encryption_key_rejected() {
        let issuer = TokenService::new(&config("test-secret", 1));
        let verifier = TokenService::new(&config("test-secret", 2));

        let token = issuer.issue_token(42).unwrap();

        assert_eq!(
            verifier.decode_token(&token),
            Err(TokenDecodeError::DecryptionFailed)
        );
    }

    #[test]
    fn test_garbage_input_is_malformed() {
        let service = service();
        assert_eq!(service.decode_token(""), Err(TokenDecodeError::Malformed));
        assert_eq!(
            service.decode_token("%%%not-base64%%%"),
            Err(TokenDecodeError::Malformed)
        );
    }

    #[test]
    fn test_random_bytes_fail_decryption() {
        use base64::engine::general_purpose::STANDARD as BASE64;
        use base64::Engine;

        let service = service();
        let garbage = BASE64.encode([0xAB_u8; 64]);

        assert_eq!(
            service.decode_token(&garbage),
            Err(TokenDecodeError::DecryptionFailed)
        );
    }

    #[test]
    fn test_bearer_extraction_accepts_any_scheme_case() {
        assert_eq!(TokenService::extract_bearer_token("Bearer abc").unwrap(), "abc");
        assert_eq!(TokenService::extract_bearer_token("bearer abc").unwrap(), "abc");
        assert_eq!(TokenService::extract_bearer_token("BEARER abc").unwrap(), "abc");
    }

    #[test]
    fn test_bearer_extraction_rejects_bad_formats() {
        assert!(TokenService::extract_bearer_token("Bearer").is_err());
        assert!(TokenService::extract_bearer_token("Bearer ").is_err());
        assert!(TokenService::extract_bearer_token("Bearer  abc").is_err());
        assert!(TokenService::extract_bearer_token("Bearer a b").is_err());
        assert!(TokenService::extract_bearer_token("Basic abc").is_err());
        assert!(TokenService::extract_bearer_token("abc").is_err());
    }
}
