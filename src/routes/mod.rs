//! API 라우트 설정 모듈
//!
//! RESTful API 엔드포인트들을 기능별로 그룹화하여 제공합니다.
//! 세션 생명주기 라우트와 헬스체크 엔드포인트를 포함합니다.
//!
//! # Features
//!
//! - 세션 생명주기 API 엔드포인트 (로그인/갱신/로그아웃)
//! - 액세스 토큰 검증 API 엔드포인트
//! - 헬스체크 엔드포인트
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::web;
//!
//! let mut cfg = web::ServiceConfig::new();
//! configure_all_routes(&mut cfg);
//! ```

use crate::handlers;
use actix_web::web;
use chrono;
use serde_json::json;

/// 모든 라우트를 설정합니다
///
/// 기능별로 분할된 라우트들을 통합하여 애플리케이션에 등록합니다.
///
/// # Arguments
///
/// * `cfg` - Actix-web 서비스 설정 객체
///
/// # Examples
///
/// ```rust,ignore
/// use actix_web::{web, App};
///
/// let app = App::new().configure(configure_all_routes);
/// ```
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    // Health check endpoint
    cfg.service(health_check);

    // Feature-specific routes
    configure_session_routes(cfg);
}

/// 세션 관련 라우트를 설정합니다
///
/// 리프레시 토큰 생명주기와 액세스 토큰 검증 API 엔드포인트를 등록합니다.
/// 모든 세션 라우트는 Public 접근이 가능합니다 (인증을 위한 엔드포인트이므로).
///
/// # Available Routes
///
/// - `POST /api/v1/auth/login` - 세션 발급 (로그인)
/// - `POST /api/v1/auth/refresh` - 리프레시 토큰 회전
/// - `POST /api/v1/auth/logout` - 단일 세션 폐기
/// - `POST /api/v1/auth/verify` - 액세스 토큰 검증
///
/// # Arguments
///
/// * `cfg` - Actix-web 서비스 설정 객체
///
/// # Examples
///
/// ```bash
/// # 세션 발급
/// curl -X POST http://localhost:8080/api/v1/auth/login \
///   -H "Content-Type: application/json" \
///   -d '{"owner_id":"user-1234"}'
///
/// # 토큰 갱신
/// curl -X POST http://localhost:8080/api/v1/auth/refresh \
///   -H "Content-Type: application/json" \
///   -d '{"refresh_token_id":"a1b2c3..."}'
/// ```
fn configure_session_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/auth")
            .service(handlers::session_handlers::login_handler)
            .service(handlers::session_handlers::refresh_handler)
            .service(handlers::session_handlers::logout_handler)
            .service(handlers::session_handlers::verify_handler),
    );
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// 로드밸런서나 모니터링 시스템에서 서비스 상태를 확인하는 데 사용됩니다.
///
/// # Returns
///
/// * `HttpResponse` - 서비스 상태 정보를 포함한 JSON 응답
///   - `status`: 서비스 상태 ("healthy")
///   - `service`: 서비스 이름
///   - `version`: 현재 버전
///   - `timestamp`: 응답 시각
///   - `features`: 사용 중인 기술 스택
///
/// # Examples
///
/// ```bash
/// curl http://localhost:8080/health
/// ```
///
/// Response:
/// ```json
/// {
///   "status": "healthy",
///   "service": "wish_session_backend",
///   "version": "0.1.0",
///   "timestamp": "2023-01-01T00:00:00Z",
///   "features": {
///     "database": "MongoDB",
///     "dependency_injection": "Singleton Macro"
///   }
/// }
/// ```
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "wish_session_backend",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "database": "MongoDB",
            "dependency_injection": "Singleton Macro"
        }
    }))
}
