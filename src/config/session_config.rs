//! # Session Configuration Module
//!
//! 리프레시 토큰 세션 정책과 JWT 액세스 토큰 설정을 관리하는 모듈입니다.
//! 환경 변수 기반으로 동작하며, 값이 없으면 안전한 기본값을 사용합니다.
//!
//! ## 환경 변수 설정
//!
//! ```bash
//! export JWT_SECRET="your-super-secret-jwt-key"
//! export JWT_EXPIRATION_HOURS="24"
//! export REFRESH_TOKEN_DURATION_SECONDS="1209600"   # 2주
//! ```

use std::env;

use crate::domain::entities::tokens::refresh_token::{
    DEFAULT_DURATION_SECONDS, MAX_DURATION_SECONDS,
};

/// JSON Web Token (JWT) 관련 설정을 관리하는 구조체
///
/// 액세스 토큰 생성/검증에 사용되는 서명 키와 만료 시간을 관리합니다.
pub struct JwtConfig;

impl JwtConfig {
    /// JWT 서명에 사용할 비밀키를 반환합니다.
    ///
    /// # 기본값
    ///
    /// 환경 변수가 설정되지 않은 경우 "your-secret-key"를 사용하지만,
    /// 이는 개발 환경에서만 안전하며 경고 로그가 출력됩니다.
    ///
    /// # 환경 변수 설정
    ///
    /// ```bash
    /// export JWT_SECRET="your-super-secret-256-bit-key-generated-securely"
    /// ```
    pub fn secret() -> String {
        env::var("JWT_SECRET").unwrap_or_else(|_| {
            log::warn!("JWT_SECRET not set, using default (not secure for production!)");
            "your-secret-key".to_string()
        })
    }

    /// JWT 액세스 토큰의 만료 시간을 시간 단위로 반환합니다.
    ///
    /// # 권장 설정값
    ///
    /// - **개발**: 24시간 (편의성 우선)
    /// - **프로덕션**: 15분~1시간 (보안 우선)
    ///
    /// # 기본값
    ///
    /// 24시간
    pub fn expiration_hours() -> i64 {
        env::var("JWT_EXPIRATION_HOURS")
            .unwrap_or_else(|_| "24".to_string())
            .parse()
            .unwrap_or(24)
    }
}

/// 리프레시 토큰 세션 정책 설정을 관리하는 구조체
///
/// 로그인 시 발급되는 리프레시 토큰의 기본 유효 기간을 결정합니다.
/// 회전(refresh) 시에는 이전 토큰의 유효 기간이 그대로 이어지므로,
/// 이 설정은 신규 로그인에만 적용됩니다.
pub struct SessionConfig;

impl SessionConfig {
    /// 신규 로그인에 적용할 리프레시 토큰 유효 기간(초)을 반환합니다.
    ///
    /// 상한(10년)을 넘거나 0 이하인 환경 변수 값은 무시하고 기본값으로
    /// 되돌립니다. 잘못된 운영 설정이 발급 경로에서 InvalidDuration으로
    /// 터지는 것보다 기본 정책으로 동작하는 편이 낫습니다.
    ///
    /// # 기본값
    ///
    /// 1,209,600초 (2주)
    ///
    /// # 환경 변수 설정
    ///
    /// ```bash
    /// export REFRESH_TOKEN_DURATION_SECONDS="604800"   # 1주
    /// ```
    pub fn refresh_duration_seconds() -> i64 {
        if let Ok(raw) = env::var("REFRESH_TOKEN_DURATION_SECONDS") {
            if let Ok(seconds) = raw.parse::<i64>() {
                if seconds > 0 && seconds <= MAX_DURATION_SECONDS {
                    return seconds;
                }
            }
            log::warn!(
                "REFRESH_TOKEN_DURATION_SECONDS is out of range, falling back to default"
            );
        }
        DEFAULT_DURATION_SECONDS
    }
}
