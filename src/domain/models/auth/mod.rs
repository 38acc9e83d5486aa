//! 인증 도메인 모델

pub mod access_policy;
pub mod claims;
pub mod subject;

pub use access_policy::*;
pub use claims::*;
pub use subject::*;
