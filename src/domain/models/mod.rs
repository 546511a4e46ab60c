//! 도메인 모델 모듈
//!
//! 영속화되지 않는 도메인 값 객체(JWT 클레임 등)를 정의합니다.

pub mod token;
