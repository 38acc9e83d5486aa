//! 토큰 암호화 서비스 구현
//!
//! 서명된 토큰 전체를 AES-256-GCM으로 암호화하여 클라이언트에게는
//! 불투명한 문자열만 전달합니다. GCM은 기밀성과 무결성을 함께 제공하므로
//! 변조된 토큰은 복호화 단계에서 거부됩니다.
//!
//! ## 와이어 형식
//!
//! ```text
//! base64( 12바이트 nonce || 암호문 || 16바이트 인증 태그 )
//! ```
//!
//! nonce는 암호화마다 무작위로 생성되므로 같은 평문을 두 번 암호화해도
//! 서로 다른 출력이 나옵니다.

use aes_gcm::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    Aes256Gcm, Key, Nonce,
};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use thiserror::Error;

use crate::errors::AppError;

/// nonce 길이 (바이트, 96비트)
pub const NONCE_LENGTH: usize = 12;

/// GCM 인증 태그 길이 (바이트, 128비트)
pub const TAG_LENGTH: usize = 16;

/// 복호화 실패 사유
///
/// 형식 오류와 인증 실패를 구분합니다. 두 경우 모두 클라이언트에게는
/// 동일한 일반 오류로 응답하고, 사유는 서버 로그에만 남깁니다.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CipherError {
    /// base64가 아니거나 nonce + 태그 길이보다 짧은 입력
    #[error("암호문 형식이 올바르지 않습니다")]
    InvalidFormat,
    /// GCM 인증 실패 (변조되었거나 다른 키로 암호화됨)
    #[error("암호문 인증에 실패했습니다")]
    AuthenticationFailed,
}

/// 토큰 암호화 서비스
///
/// 키는 프로세스 시작 시 한 번 주입되며 교체는 재시작으로만 가능합니다.
#[derive(Clone)]
pub struct TokenCipher {
    cipher: Aes256Gcm,
}

impl TokenCipher {
    /// 32바이트 키로 새 암호화 서비스를 생성합니다.
    pub fn new(key: [u8; 32]) -> Self {
        let key = Key::<Aes256Gcm>::from_slice(&key);
        Self {
            cipher: Aes256Gcm::new(key),
        }
    }

    /// 평문을 암호화하여 base64 문자열로 반환합니다.
    ///
    /// 호출마다 무작위 nonce를 생성하므로 출력은 비결정적입니다.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<String, AppError> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext)
            .map_err(|e| AppError::InternalError(format!("토큰 암호화 실패: {}", e)))?;

        let mut combined = Vec::with_capacity(NONCE_LENGTH + ciphertext.len());
        combined.extend_from_slice(&nonce);
        combined.extend_from_slice(&ciphertext);

        Ok(BASE64.encode(combined))
    }

    /// base64 암호문을 복호화합니다.
    ///
    /// # Errors
    ///
    /// * `CipherError::InvalidFormat` - base64 디코딩 실패 또는 입력이 너무 짧음
    /// * `CipherError::AuthenticationFailed` - 인증 태그 검증 실패
    pub fn decrypt(&self, ciphertext_base64: &str) -> Result<Vec<u8>, CipherError> {
        let combined = BASE64
            .decode(ciphertext_base64)
            .map_err(|_| CipherError::InvalidFormat)?;

        if combined.len() < NONCE_LENGTH + TAG_LENGTH {
            return Err(CipherError::InvalidFormat);
        }

        let (nonce_bytes, ciphertext) = combined.split_at(NONCE_LENGTH);
        let nonce = Nonce::from_slice(nonce_bytes);

        self.cipher
            .decrypt(nonce, ciphertext)
            .map_err(|_| CipherError::AuthenticationFailed)
    }
}

impl std::fmt::Debug for TokenCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // 키 자료는 로그에 노출하지 않는다
        f.debug_struct("TokenCipher").field("cipher", &"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cipher_with(key_byte: u8) -> TokenCipher {
        TokenCipher::new([key_byte; 32])
    }

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let cipher = cipher_with(1);
        let plaintext = b"signed-token-payload";

        let encrypted = cipher.encrypt(plaintext).unwrap();
        let decrypted = cipher.decrypt(&encrypted).unwrap();

        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn test_encryption_is_nondeterministic() {
        let cipher = cipher_with(1);

        let first = cipher.encrypt(b"same-input").unwrap();
        let second = cipher.encrypt(b"same-input").unwrap();

        // 무작위 nonce로 인해 출력이 매번 달라야 한다
        assert_ne!(first, second);
        assert_eq!(cipher.decrypt(&first).unwrap(), cipher.decrypt(&second).unwrap());
    }

    #[test]
    fn test_tampered_ciphertext_rejected() {
        let cipher = cipher_with(1);
        let encrypted = cipher.encrypt(b"payload").unwrap();

        let mut bytes = BASE64.decode(&encrypted).unwrap();
        if let Some(byte) = bytes.last_mut() {
            *byte ^= 0xFF;
        }
        let tampered = BASE64.encode(bytes);

        assert_eq!(cipher.decrypt(&tampered), Err(CipherError::AuthenticationFailed));
    }

    #[test]
    fn test_wrong_key_rejected() {
        let encrypted = cipher_with(1).encrypt(b"payload").unwrap();
        let result = cipher_with(2).decrypt(&encrypted);

        assert_eq!(result, Err(CipherError::AuthenticationFailed));
    }

    #[test]
    fn test_invalid_base64_rejected() {
        let cipher = cipher_with(1);
        assert_eq!(cipher.decrypt("%%%not-base64%%%"), Err(CipherError::InvalidFormat));
    }

    #[test]
    fn test_too_short_input_rejected() {
        let cipher = cipher_with(1);
        let short = BASE64.encode([0u8; NONCE_LENGTH + TAG_LENGTH - 1]);
        assert_eq!(cipher.decrypt(&short), Err(CipherError::InvalidFormat));
    }

    #[test]
    fn test_empty_plaintext_roundtrip() {
        let cipher = cipher_with(1);
        let encrypted = cipher.encrypt(b"").unwrap();
        assert_eq!(cipher.decrypt(&encrypted).unwrap(), b"");
    }
}
