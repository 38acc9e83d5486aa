//! API 스타터 백엔드
//!
//! Rust 기반의 REST API 보일러플레이트입니다.
//! 암호화된 액세스 토큰 기반 인증, 선언적 접근 정책 가드,
//! 역할 기반 인가를 제공합니다.
//!
//! # Features
//!
//! - **토큰 인증**: 서명 후 암호화되는 불투명 액세스 토큰 (HMAC-SHA256 + AES-256-GCM)
//! - **접근 정책 가드**: 라우트별 선언적 정책 (공개/보호/비로그인 전용/역할)
//! - **사용자 관리**: 회원가입, 로그인, 프로필, 관리자 CRUD
//! - **명시적 의존성 주입**: main에서 구성 트리를 한 번 조립
//! - **MongoDB**: 영구 저장소 (순차 정수 ID)
//! - **Redis**: 보안과 무관한 읽기 경로 캐싱
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← 엔드포인트 + 접근 정책 선언
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   Auth Guard    │ ← 토큰 검증, 주체 조회, 역할 검사
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 로직
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 데이터 액세스
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │ ← 저장소
//! └─────────────────┘
//! ```

pub mod caching;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod middlewares;
pub mod repositories;
pub mod routes;
pub mod services;
