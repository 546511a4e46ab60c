//! 에러 처리 모듈
//!
//! 도메인 에러([`SessionError`])와 HTTP 에러([`AppError`])를 정의합니다.

pub mod errors;

pub use errors::*;
