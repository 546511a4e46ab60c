//! # Domain Layer Module
//!
//! 도메인 계층을 구성하는 핵심 모듈로, 비즈니스 로직과 도메인 규칙을 담당합니다.
//! Domain-Driven Design (DDD) 원칙에 따라 설계되었습니다.
//!
//! ## 아키텍처 개요
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── Entities      - 핵심 비즈니스 객체 (RefreshToken)
//! ├── DTOs          - 데이터 전송 객체 (Request/Response)
//! └── Models        - 값 객체 (JWT 클레임 등)
//!      │
//!      ▼
//! Application Layer (Services)
//!      │
//!      ▼
//! Infrastructure Layer (Repositories, DB)
//! ```
//!
//! ## 설계 원칙
//!
//! - 엔티티는 상속 계층 없는 평범한 데이터 타입 + 동작 함수로 구성
//! - 상태 전이(교체/폐기)는 엔티티 메서드와 저장소의 조건부 갱신이 함께 보장
//! - DTO와 엔티티를 분리하여 내부 이력 필드가 API로 새지 않도록 함

pub mod dto;
pub mod entities;
pub mod models;
