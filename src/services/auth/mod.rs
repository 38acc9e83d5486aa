//! 인증 서비스 모듈

pub mod cipher_service;
pub mod token_service;

pub use cipher_service::*;
pub use token_service::*;
