//! 도메인 계층 모듈
//!
//! 엔티티, 도메인 모델, DTO를 포함하는 도메인 계층입니다.

pub mod dto;
pub mod entities;
pub mod models;

pub use entities::*;
pub use models::*;
