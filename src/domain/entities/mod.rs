//! 도메인 엔티티 모듈

pub mod products;
pub mod users;

pub use products::*;
pub use users::*;
