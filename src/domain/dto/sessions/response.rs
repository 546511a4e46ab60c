use serde::Serialize;

/// API 응답 래퍼
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn error(message: String) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message: Some(message),
        }
    }
}

/// 로그인 응답 DTO
///
/// 리프레시 토큰의 전달 방식(쿠키/헤더)은 이 서브시스템의 범위 밖이므로
/// 토큰 ID를 본문으로만 돌려줍니다.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// 새로 발급된 리프레시 토큰 ID
    pub refresh_token_id: String,
    /// 리프레시 토큰 만료 시각 (Unix 밀리초)
    pub refresh_expires_at: i64,
}

/// 토큰 갱신 응답 DTO
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    /// 새로 발급된 액세스 토큰 (JWT)
    pub access_token: String,
    /// 후속 리프레시 토큰 ID
    pub refresh_token_id: String,
}

/// 로그아웃 응답 DTO
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub ok: bool,
}

/// 액세스 토큰 검증 응답 DTO
#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub valid: bool,
    /// 토큰 소유자 ID (유효한 경우에만)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_shape() {
        let body = serde_json::to_value(ApiResponse::success(LogoutResponse { ok: true })).unwrap();

        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["ok"], true);
        assert!(body["message"].is_null());
    }

    #[test]
    fn test_error_envelope_shape() {
        // 에러 응답도 성공 응답과 같은 봉투를 사용함 (AppError::error_response)
        let body =
            serde_json::to_value(ApiResponse::<()>::error("invalid refresh token".to_string()))
                .unwrap();

        assert_eq!(body["success"], false);
        assert!(body["data"].is_null());
        assert_eq!(body["message"], "invalid refresh token");
    }
}
