//! HTTP 핸들러 모듈

pub mod auth;
pub mod products;
pub mod profile;
pub mod users;
