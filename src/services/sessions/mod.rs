//! 세션 생명주기 서비스 모듈
//!
//! 리프레시 토큰의 발급, 회전, 탈취 대응 폐기를 담당하는
//! [`SessionService`](session_service::SessionService)를 제공합니다.

pub mod session_service;

pub use session_service::*;
