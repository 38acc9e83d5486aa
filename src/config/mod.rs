//! # Configuration Module
//!
//! 백엔드 서비스의 설정 관리를 담당하는 모듈입니다.
//! 환경 변수 기반의 설정값들을 프로세스 시작 시점에 **한 번만** 읽어
//! 불변 구조체로 고정합니다. 이후에는 환경 변수를 다시 읽지 않으며,
//! 각 컴포넌트는 생성자 인자로 필요한 설정을 전달받습니다.
//!
//! ## 모듈 구성
//!
//! - [`app_config`] - 서버, 데이터베이스, Redis, Rate Limiting 설정
//! - [`auth_config`] - 토큰 서명/암호화 비밀키, bcrypt 설정
//!
//! ## 설계 원칙
//!
//! 1. **시작 시점 고정**: `AppConfig::from_env()`는 main에서 한 번 호출됩니다.
//!    비밀키 교체는 프로세스 재시작으로만 가능합니다.
//! 2. **명시적 전달**: 전역 조회 없이 생성자를 통해 설정을 주입합니다.
//! 3. **보안 우선**: 프로덕션 환경에서 기본 비밀키 사용 시 경고를 출력합니다.
//!
//! ## 필수 환경 변수
//!
//! ```bash
//! export JWT_SIGNING_SECRET="your-signing-secret"
//! export TOKEN_ENCRYPTION_KEY="base64-encoded-32-byte-key"  # openssl rand -base64 32
//! export MONGODB_URI="mongodb://localhost:27017"
//! export REDIS_URL="redis://localhost:6379"
//! ```

pub mod app_config;
pub mod auth_config;

pub use app_config::*;
pub use auth_config::*;
