//! # Configuration Module
//!
//! 백엔드 서비스의 설정 관리를 담당하는 모듈입니다.
//! 환경 변수 기반의 설정값들을 중앙집중식으로 관리합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 서버 바인딩 설정
//! - [`session_config`] - 세션 정책, JWT 관련 설정
//!
//! ## 설계 원칙
//!
//! - 민감한 정보는 환경 변수로만 제공
//! - 기본값은 개발 환경에서만 안전 (프로덕션에서는 경고 로그 출력)
//! - 런타임 설정값 파싱 오류는 기본값으로 복구
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 서버 설정
//! export HOST="0.0.0.0"
//! export PORT="8080"
//!
//! # JWT 설정
//! export JWT_SECRET="your-super-secret-key"
//! export JWT_EXPIRATION_HOURS="24"
//!
//! # 세션 정책
//! export REFRESH_TOKEN_DURATION_SECONDS="1209600"
//! ```

pub mod data_config;
pub mod session_config;

pub use data_config::*;
pub use session_config::*;
