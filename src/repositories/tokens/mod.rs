//! 리프레시 토큰 데이터 액세스 계층 모듈
//!
//! [`TokenStore`](token_store::TokenStore) 계약과 MongoDB 구현체
//! [`TokenRepository`](token_repository::TokenRepository)를 제공합니다.
//! `#[repository]` 매크로를 사용하여 싱글톤으로 관리됩니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::tokens::token_repository::TokenRepository;
//!
//! let repo = TokenRepository::instance();
//! let token = repo.find_by_id(token_id).await?;
//! ```

pub mod token_repository;
pub mod token_store;

pub use token_repository::*;
pub use token_store::*;
