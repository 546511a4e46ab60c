//! HTTP 요청 핸들러 모듈
//!
//! 세션 생명주기와 토큰 검증 관련 API 엔드포인트를 처리합니다.

pub mod session_handlers;

pub use session_handlers::*;
