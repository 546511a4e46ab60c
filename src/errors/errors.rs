//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! 세션 백엔드를 위한 통합 에러 처리 시스템입니다.
//! `thiserror`와 `actix_web::ResponseError`를 사용하여 타입 안전하고
//! 일관된 에러 처리를 제공합니다.
//!
//! 도메인 계층은 [`SessionError`]로 실패 원인을 정밀하게 구분하고,
//! HTTP 경계에서 [`AppError`]로 변환됩니다. 이때 인증 실패 계열
//! (NotFound / Expired / Reused / AlreadyRevoked)은 전부 동일한 401 응답으로
//! 뭉개집니다 — 구체적인 거부 사유는 공격자에게 탐침 신호가 되므로
//! 서버 로그에만 남깁니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::{AppError, SessionError};
//!
//! async fn refresh(token_id: &str) -> Result<Tokens, AppError> {
//!     let record = store.find_by_id(token_id).await?
//!         .ok_or(SessionError::NotFound)?;
//!     // ...
//! }
//! ```

use thiserror::Error;

use crate::domain::dto::sessions::response::ApiResponse;

/// 세션 도메인 에러 타입
///
/// 토큰 발급/회전/폐기 과정에서 발생하는 실패를 원인별로 구분합니다.
/// 이 구분은 내부 로직(cascade 트리거 여부)과 로깅에 사용되며,
/// 클라이언트 응답 단계에서는 [`AppError`]로 변환되면서 인증 실패
/// 네 종류가 하나의 메시지로 합쳐집니다.
#[derive(Error, Debug, PartialEq)]
pub enum SessionError {
    /// 존재하지 않는 토큰 ID로 요청됨
    #[error("refresh token not found")]
    NotFound,

    /// 유효 기간이 지난 토큰 (탈취 신호 아님, cascade 없음)
    #[error("refresh token expired")]
    Expired,

    /// 이미 교체된 토큰의 재사용 — 탈취 신호, cascade 수행됨
    #[error("refresh token already used")]
    Reused,

    /// 이미 폐기된 토큰의 사용 — cascade 수행됨
    #[error("refresh token already revoked")]
    AlreadyRevoked,

    /// 허용 범위를 벗어난 유효 기간으로 발급 시도됨
    #[error("invalid token duration: {0} seconds")]
    InvalidDuration(i64),

    /// 토큰 저장소 접근 실패 — 인증 실패로 위장되어서는 안 됨
    #[error("token store unavailable: {0}")]
    StoreUnavailable(String),
}

impl SessionError {
    /// 인증 실패 계열 여부 (클라이언트에 401로 뭉개지는 네 종류)
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            SessionError::NotFound
                | SessionError::Expired
                | SessionError::Reused
                | SessionError::AlreadyRevoked
        )
    }
}

/// 애플리케이션 전역 에러 타입
///
/// 서비스에서 발생할 수 있는 모든 종류의 에러를 포괄하는 열거형입니다.
/// 자동으로 HTTP 응답으로 변환되어 클라이언트에게 전달됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 데이터베이스 관련 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 리소스 찾을 수 없음 에러 (404 Not Found)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 인증 실패 에러 (401 Unauthorized)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl From<SessionError> for AppError {
    /// 도메인 에러를 HTTP 에러로 변환합니다.
    ///
    /// 인증 실패 네 종류는 모두 동일한 문구의 401이 됩니다. 클라이언트는
    /// "토큰이 없었는지 / 만료였는지 / 재사용이었는지"를 구분할 수 없어야
    /// 합니다. 저장소 장애는 절대 인증 실패로 변환하지 않습니다.
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NotFound
            | SessionError::Expired
            | SessionError::Reused
            | SessionError::AlreadyRevoked => {
                AppError::AuthenticationError("invalid refresh token".to_string())
            }
            SessionError::InvalidDuration(seconds) => {
                AppError::InternalError(format!("invalid token duration: {} seconds", seconds))
            }
            SessionError::StoreUnavailable(msg) => AppError::DatabaseError(msg),
        }
    }
}

impl actix_web::ResponseError for AppError {
    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 각 에러 타입을 적절한 HTTP 상태 코드로 변환하고, 성공 응답과 같은
    /// [`ApiResponse`] 봉투에 담아 반환합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        use actix_web::http::StatusCode;

        let status = match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        actix_web::HttpResponse::build(status)
            .json(ApiResponse::<()>::error(self.to_string()))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;

    #[test]
    fn test_auth_failures_collapse_to_one_message() {
        let kinds = [
            SessionError::NotFound,
            SessionError::Expired,
            SessionError::Reused,
            SessionError::AlreadyRevoked,
        ];

        let mut messages = std::collections::HashSet::new();
        for kind in kinds {
            assert!(kind.is_auth_failure());
            let app: AppError = kind.into();
            let response = app.error_response();
            assert_eq!(response.status(), actix_web::http::StatusCode::UNAUTHORIZED);
            messages.insert(app.to_string());
        }

        // 네 종류 모두 같은 문구 하나로 합쳐짐
        assert_eq!(messages.len(), 1);
    }

    #[test]
    fn test_store_unavailable_is_never_unauthorized() {
        let err = SessionError::StoreUnavailable("connection refused".to_string());
        assert!(!err.is_auth_failure());

        let app: AppError = err.into();
        let response = app.error_response();
        assert_eq!(
            response.status(),
            actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_invalid_duration_maps_to_internal_error() {
        let app: AppError = SessionError::InvalidDuration(-5).into();
        let response = app.error_response();
        assert_eq!(
            response.status(),
            actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_error_response() {
        let error = AppError::ValidationError("client IP is required".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_error_response() {
        let error = AppError::NotFound("session not found".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::NOT_FOUND);
    }
}
