//! 요청/응답 DTO 모듈

pub mod auth;
pub mod products;
pub mod profile;
pub mod users;
