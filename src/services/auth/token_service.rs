//! JWT 액세스 토큰 관리 서비스 구현
//!
//! HMAC-SHA256 서명 기반의 액세스 토큰 생성과 검증을 담당합니다.
//! 세션 핵심 로직은 이 서비스를 "액세스 토큰 발급자" 협력자로만 사용하며,
//! 토큰 형식 자체에는 의존하지 않습니다.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use singleton_macro::service;

use crate::config::JwtConfig;
use crate::domain::models::token::token::TokenClaims;
use crate::errors::errors::AppError;

/// JWT 액세스 토큰 관리 서비스
///
/// HMAC-SHA256 서명을 사용하여 안전한 JWT 토큰을 생성하고 검증합니다.
#[service(name = "token")]
pub struct TokenService {
    // 외부 의존성 없음
}

impl TokenService {
    /// 소유자를 위한 JWT 액세스 토큰 생성
    ///
    /// # Arguments
    ///
    /// * `owner_id` - 토큰을 발급받을 사용자 ID
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - 생성된 JWT 액세스 토큰
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 토큰 생성 실패
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let token_service = TokenService::instance();
    /// let access_token = token_service.mint("user-42")?;
    /// ```
    pub fn mint(&self, owner_id: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let expiration = now + Duration::hours(JwtConfig::expiration_hours());

        let claims = TokenClaims {
            sub: owner_id.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        let secret = JwtConfig::secret();
        let header = Header::default();
        let encoding_key = EncodingKey::from_secret(secret.as_ref());

        encode(&header, &claims, &encoding_key)
            .map_err(|e| AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e)))
    }

    /// JWT 토큰 검증 및 클레임 추출
    ///
    /// # Arguments
    ///
    /// * `token` - 검증할 JWT 토큰 문자열 (Bearer 접두사 제외)
    ///
    /// # Returns
    ///
    /// * `Ok(TokenClaims)` - 검증된 토큰의 클레임 정보
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 토큰 만료, 잘못된 형식/서명
    /// * `AppError::InternalError` - 기타 시스템 오류
    pub fn verify(&self, token: &str) -> Result<TokenClaims, AppError> {
        let secret = JwtConfig::secret();
        let decoding_key = DecodingKey::from_secret(secret.as_ref());
        let validation = Validation::default();

        decode::<TokenClaims>(token, &decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::AuthenticationError("토큰이 만료되었습니다".to_string())
                }
                jsonwebtoken::errors::ErrorKind::InvalidToken
                | jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::AuthenticationError("유효하지 않은 토큰입니다".to_string())
                }
                _ => AppError::InternalError(format!("토큰 검증 실패: {}", e)),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mint_then_verify_roundtrip() {
        let token_service = TokenService::instance();
        let token = token_service.mint("user-42").unwrap();
        let claims = token_service.verify(&token).unwrap();

        assert_eq!(claims.sub, "user-42");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let token_service = TokenService::instance();
        let result = token_service.verify("not-a-jwt");

        assert!(matches!(
            result,
            Err(AppError::AuthenticationError(_)) | Err(AppError::InternalError(_))
        ));
    }
}
