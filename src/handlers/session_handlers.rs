//! 세션 API 핸들러
//!
//! 로그인/갱신/로그아웃/토큰 검증 HTTP 엔드포인트를 처리합니다.
//! 도메인 에러는 [`AppError`]의 `ResponseError` 구현을 통해 HTTP 응답으로
//! 변환되며, 인증 실패의 구체적 사유는 응답에 드러나지 않습니다.

use actix_web::{HttpRequest, HttpResponse, post, web};
use validator::Validate;

use crate::domain::dto::sessions::{
    ApiResponse, LoginRequest, LoginResponse, LogoutRequest, LogoutResponse, RefreshRequest,
    RefreshResponse, VerifyRequest, VerifyResponse,
};
use crate::errors::errors::AppError;
use crate::services::auth::token_service::TokenService;
use crate::services::sessions::session_service::SessionService;

/// 로그인 API 핸들러
///
/// 인증된 사용자에게 새 리프레시 토큰 세션을 발급합니다.
/// 자격 증명 검증은 상위 협력자(사용자 서비스)에서 이미 끝난 상태입니다.
#[post("/login")]
pub async fn login_handler(
    req: HttpRequest,
    login_req: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    login_req
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let ip_address = require_client_ip(&req)?;

    let session_service = SessionService::instance();
    let token = session_service
        .login(&login_req.owner_id, &ip_address, login_req.duration_seconds)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(LoginResponse {
        refresh_expires_at: token.expire_at_millis(),
        refresh_token_id: token.id,
    })))
}

/// 토큰 갱신 API 핸들러
///
/// 리프레시 토큰을 일회용으로 소모하고 새 액세스 토큰 + 후속 리프레시
/// 토큰을 돌려줍니다. 모든 거부 사유는 동일한 401로 응답됩니다.
#[post("/refresh")]
pub async fn refresh_handler(
    req: HttpRequest,
    refresh_req: web::Json<RefreshRequest>,
) -> Result<HttpResponse, AppError> {
    refresh_req
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let ip_address = require_client_ip(&req)?;

    let session_service = SessionService::instance();
    let (access_token, successor) = session_service
        .refresh(&refresh_req.refresh_token_id, &ip_address)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(RefreshResponse {
        access_token,
        refresh_token_id: successor.id,
    })))
}

/// 로그아웃 API 핸들러
///
/// 단일 세션만 폐기합니다. 알 수 없는 토큰 ID는 404로 응답하고,
/// 이미 폐기된 토큰의 로그아웃은 멱등하게 성공합니다.
#[post("/logout")]
pub async fn logout_handler(
    logout_req: web::Json<LogoutRequest>,
) -> Result<HttpResponse, AppError> {
    logout_req
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let session_service = SessionService::instance();
    session_service.logout(&logout_req.refresh_token_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(LogoutResponse { ok: true })))
}

/// 액세스 토큰 검증 API 핸들러 (introspection)
///
/// wish API 등 외부 협력자가 액세스 토큰의 유효성을 조회할 때 사용합니다.
/// 유효하지 않은 토큰도 200으로 응답하며 `valid: false`로 표시합니다.
#[post("/verify")]
pub async fn verify_handler(
    verify_req: web::Json<VerifyRequest>,
) -> Result<HttpResponse, AppError> {
    verify_req
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let token_service = TokenService::instance();
    let response = match token_service.verify(&verify_req.access_token) {
        Ok(claims) => VerifyResponse {
            valid: true,
            owner_id: Some(claims.sub),
        },
        Err(AppError::AuthenticationError(_)) => VerifyResponse {
            valid: false,
            owner_id: None,
        },
        Err(e) => return Err(e),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
}

/// HTTP 요청에서 클라이언트 IP 주소 추출
///
/// 프록시나 로드 밸런서를 고려하여 다양한 헤더에서 실제 클라이언트 IP를 추출합니다.
///
/// # 우선순위
/// 1. `X-Forwarded-For` (첫 번째 IP)
/// 2. `X-Real-IP`
/// 3. `X-Client-IP`
/// 4. `CF-Connecting-IP` (Cloudflare)
/// 5. 연결 정보에서 peer 주소
pub fn extract_client_ip(req: &HttpRequest) -> Option<String> {
    // X-Forwarded-For 헤더 확인 (프록시 환경에서 가장 일반적)
    if let Some(forwarded_for) = req.headers().get("X-Forwarded-For") {
        if let Ok(forwarded_str) = forwarded_for.to_str() {
            // 첫 번째 IP만 사용 (체인의 첫 번째가 원본 클라이언트)
            if let Some(first_ip) = forwarded_str.split(',').next() {
                let trimmed_ip = first_ip.trim();
                if !trimmed_ip.is_empty() {
                    return Some(trimmed_ip.to_string());
                }
            }
        }
    }

    // X-Real-IP 헤더 확인
    if let Some(real_ip) = req.headers().get("X-Real-IP") {
        if let Ok(ip_str) = real_ip.to_str() {
            return Some(ip_str.to_string());
        }
    }

    // X-Client-IP 헤더 확인
    if let Some(client_ip) = req.headers().get("X-Client-IP") {
        if let Ok(ip_str) = client_ip.to_str() {
            return Some(ip_str.to_string());
        }
    }

    // CF-Connecting-IP 헤더 확인 (Cloudflare)
    if let Some(cf_ip) = req.headers().get("CF-Connecting-IP") {
        if let Ok(ip_str) = cf_ip.to_str() {
            return Some(ip_str.to_string());
        }
    }

    // 마지막 수단: 연결 정보에서 peer 주소
    if let Some(peer_addr) = req.peer_addr() {
        return Some(peer_addr.ip().to_string());
    }

    None
}

/// 클라이언트 IP가 없으면 400으로 거부
///
/// 토큰 레코드의 `ip_address`는 비어 있을 수 없는 불변식이므로,
/// 출처를 알 수 없는 요청은 핵심 로직에 도달하기 전에 차단합니다.
fn require_client_ip(req: &HttpRequest) -> Result<String, AppError> {
    extract_client_ip(req).ok_or_else(|| {
        AppError::ValidationError("client IP address could not be determined".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_forwarded_for_takes_first_hop() {
        let req = TestRequest::default()
            .insert_header(("X-Forwarded-For", "203.0.113.7, 10.0.0.1"))
            .insert_header(("X-Real-IP", "10.0.0.2"))
            .to_http_request();

        assert_eq!(extract_client_ip(&req).as_deref(), Some("203.0.113.7"));
    }

    #[test]
    fn test_real_ip_fallback() {
        let req = TestRequest::default()
            .insert_header(("X-Real-IP", "198.51.100.4"))
            .to_http_request();

        assert_eq!(extract_client_ip(&req).as_deref(), Some("198.51.100.4"));
    }

    #[test]
    fn test_missing_ip_is_rejected() {
        let req = TestRequest::default().to_http_request();

        assert!(extract_client_ip(&req).is_none());
        assert!(matches!(
            require_client_ip(&req),
            Err(AppError::ValidationError(_))
        ));
    }
}
