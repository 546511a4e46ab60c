//! 인증 토큰 서비스 모듈
//!
//! JWT 액세스 토큰의 생성과 검증을 담당하는
//! [`TokenService`](token_service::TokenService)를 제공합니다.
//!
//! # Security
//!
//! - HMAC-SHA256 토큰 서명
//! - 토큰 만료 시간 관리

pub mod token_service;

pub use token_service::*;
