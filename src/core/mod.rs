//! # Core Framework Module
//!
//! 백엔드 서비스를 위한 핵심 프레임워크 기능을 제공하는 모듈입니다.
//! 싱글톤 의존성 주입 컨테이너([`registry::ServiceLocator`])를 포함합니다.

pub mod registry;
