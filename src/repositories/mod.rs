//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! `#[repository]` 매크로를 사용하여 싱글톤으로 관리되는 리포지토리들을 제공합니다.
//! MongoDB를 주 저장소로 사용합니다.
//!
//! # Features
//!
//! - 싱글톤 패턴을 통한 메모리 효율적인 인스턴스 관리
//! - 자동 의존성 주입을 통한 간편한 설정
//! - 저장소 추상화([`tokens::TokenStore`])를 통한 테스트 용이성
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::tokens::TokenRepository;
//!
//! let token_repo = TokenRepository::instance();
//! let token = token_repo.find_by_id("b1f9c2aa-...").await?;
//! ```

pub mod tokens;
