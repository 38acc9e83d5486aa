//! 비즈니스 로직 계층 모듈

pub mod auth;
pub mod products;
pub mod users;
