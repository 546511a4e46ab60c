//! # Data Transfer Objects (DTO) Module
//!
//! API 경계에서 데이터를 전송하기 위한 객체들을 정의하는 모듈입니다.
//! 클라이언트와 서버 간의 데이터 계약(Contract)을 명확히 정의합니다.
//!
//! ## 설계 원칙
//!
//! - **내부 표현 vs 외부 표현**: Entity와 DTO의 명확한 분리
//! - **유효성 검증 내장**: `validator` crate를 통한 요청 검증
//! - **보안**: 민감한 정보(교체/폐기 이력 등)의 노출 방지
//!
//! ## 명명 규칙
//!
//! - **Request DTO**: `{Action}Request` (예: `RefreshRequest`)
//! - **Response DTO**: `{Action}Response` (예: `RefreshResponse`)

pub mod sessions;

pub use sessions::*;
