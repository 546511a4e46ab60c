//! JWT 액세스 토큰 클레임 구조체
//!
//! RFC 7519 JWT 표준 클레임 중 이 서비스가 사용하는 최소 집합만 포함합니다.
use serde::{Deserialize, Serialize};

/// JWT 토큰의 클레임(Payload) 구조체
///
/// 개인정보 보호를 위해 최소한의 정보만 포함합니다.
///
/// ## 클레임 구성
///
/// - `sub`: 토큰의 주체 (사용자 ID)
/// - `iat`: 토큰 발급 시간 (Unix timestamp)
/// - `exp`: 토큰 만료 시간 (Unix timestamp)
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    /// 토큰의 주체 (사용자 ID)
    pub sub: String,
    /// 토큰 발급 시간 (Unix timestamp)
    pub iat: i64,
    /// 토큰 만료 시간 (Unix timestamp)
    pub exp: i64,
}
