//! 데이터 액세스 계층 모듈
//!
//! MongoDB 컬렉션별 리포지토리를 제공합니다.
//! 리포지토리는 main에서 명시적으로 생성되어 서비스에 주입됩니다.

pub mod counters;
pub mod products;
pub mod users;
