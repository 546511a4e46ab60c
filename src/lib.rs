//! 위시 세션 서비스 백엔드
//!
//! Rust 기반의 리프레시 토큰 세션 관리 서비스입니다.
//! 일회용 리프레시 토큰 회전, 재사용 감지 기반 탈취 대응,
//! 그리고 싱글톤 매크로를 활용한 의존성 주입을 제공합니다.
//!
//! # Features
//!
//! - **세션 생명주기**: 로그인 발급, 갱신 회전, 단일 로그아웃
//! - **JWT 인증**: 단기 액세스 토큰 발급 및 검증
//! - **재사용 감지**: 소모된 토큰 재제출 시 상관 세션 일괄 폐기
//! - **싱글톤 DI**: 매크로 기반 자동 의존성 주입
//! - **MongoDB**: 토큰 레코드 영구 저장 (삭제 없이 보존)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 세션 생명주기 로직
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 토큰 레코드 액세스
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │     MongoDB     │ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use wish_session_backend::services::sessions::SessionService;
//! use wish_session_backend::services::auth::TokenService;
//!
//! // 싱글톤 서비스 인스턴스 가져오기
//! let session_service = SessionService::instance();
//! let token_service = TokenService::instance();
//!
//! // 세션 발급 및 갱신
//! let token = session_service.login("user-1234", "203.0.113.7", None).await?;
//! let (access, successor) = session_service.refresh(&token.id, "203.0.113.7").await?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod routes;
pub mod handlers;
pub mod errors;
