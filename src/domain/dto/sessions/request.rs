use serde::Deserialize;
use validator::Validate;

/// 로그인 요청 DTO
///
/// 자격 증명 검증은 외부 협력자(사용자 서비스) 몫이며, 이 서브시스템은
/// 인증이 끝난 사용자 ID와 선택적 유효 기간만 사용합니다.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// 인증된 사용자 ID
    #[validate(length(min = 1, message = "owner_id is required"))]
    pub owner_id: String,

    /// 리프레시 토큰 유효 기간 오버라이드 (초 단위, 생략 시 기본 정책)
    ///
    /// 클라이언트 입력이므로 발급 경로에 도달하기 전에 허용 범위
    /// (양수, 10년 이하)를 검증하여 400으로 거부합니다.
    #[validate(range(
        min = 1,
        max = 315_360_000,
        message = "duration_seconds must be between 1 second and 10 years"
    ))]
    pub duration_seconds: Option<i64>,
}

/// 토큰 갱신 요청 DTO
#[derive(Debug, Deserialize, Validate)]
pub struct RefreshRequest {
    /// 회전 대상 리프레시 토큰 ID
    #[validate(length(min = 1, message = "refresh_token_id is required"))]
    pub refresh_token_id: String,
}

/// 로그아웃 요청 DTO
#[derive(Debug, Deserialize, Validate)]
pub struct LogoutRequest {
    /// 폐기 대상 리프레시 토큰 ID
    #[validate(length(min = 1, message = "refresh_token_id is required"))]
    pub refresh_token_id: String,
}

/// 액세스 토큰 검증 요청 DTO
#[derive(Debug, Deserialize, Validate)]
pub struct VerifyRequest {
    #[validate(length(min = 1, message = "access_token is required"))]
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login_request(duration_seconds: Option<i64>) -> LoginRequest {
        LoginRequest {
            owner_id: "owner-1".to_string(),
            duration_seconds,
        }
    }

    #[test]
    fn test_login_duration_override_must_be_in_range() {
        // 범위 밖 오버라이드는 요청 검증 단계에서 거부됨
        assert!(login_request(Some(0)).validate().is_err());
        assert!(login_request(Some(-1)).validate().is_err());
        assert!(login_request(Some(315_360_000 + 1)).validate().is_err());

        // 경계값과 생략은 허용
        assert!(login_request(Some(1)).validate().is_ok());
        assert!(login_request(Some(315_360_000)).validate().is_ok());
        assert!(login_request(None).validate().is_ok());
    }

    #[test]
    fn test_login_owner_id_is_required() {
        let request = LoginRequest {
            owner_id: String::new(),
            duration_seconds: None,
        };
        assert!(request.validate().is_err());
    }
}
