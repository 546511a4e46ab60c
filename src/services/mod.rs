//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! `#[service]` 매크로를 사용하여 싱글톤으로 관리되는 서비스들을 제공합니다.
//!
//! # Features
//!
//! - 세션 생명주기 관리 (로그인, 갱신, 로그아웃)
//! - 토큰 재사용 감지 및 상관 세션 일괄 폐기
//! - JWT 액세스 토큰 발급/검증
//! - 자동 의존성 주입 및 싱글톤 관리
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::{auth::TokenService, sessions::SessionService};
//!
//! let session_service = SessionService::instance();
//! let token_service = TokenService::instance();
//! ```

pub mod auth;
pub mod sessions;
