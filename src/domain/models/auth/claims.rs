//! 액세스 토큰 클레임 정의

use serde::{Deserialize, Serialize};

/// 액세스 토큰 유효 기간 (7일, 초 단위)
pub const TOKEN_TTL_SECS: i64 = 604_800;

/// 액세스 토큰 클레임
///
/// 서명되는 내부 페이로드입니다. 만료 시각은 발급 시각에서
/// 고정 TTL을 더해 계산되며 호출자가 지정할 수 없습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// 주체 사용자 ID
    pub sub: i64,
    /// 발급 시각 (Unix timestamp)
    pub iat: i64,
    /// 만료 시각 (iat + TTL)
    pub exp: i64,
}

impl AccessClaims {
    /// 발급 시각 기준으로 새 클레임을 생성합니다.
    pub fn new(subject_id: i64, issued_at: i64) -> Self {
        Self {
            sub: subject_id,
            iat: issued_at,
            exp: issued_at + TOKEN_TTL_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_is_fixed_ttl_from_issuance() {
        let claims = AccessClaims::new(42, 1_700_000_000);
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.iat, 1_700_000_000);
        assert_eq!(claims.exp, 1_700_000_000 + TOKEN_TTL_SECS);
    }
}
