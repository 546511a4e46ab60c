//! 토큰 저장소 추상화
//!
//! 세션 로직(발급/회전/cascade)이 의존하는 저장소 계약입니다.
//! 프로덕션에서는 MongoDB 구현체가 사용되며, 테스트에서는 인메모리
//! 구현체로 대체됩니다.

use async_trait::async_trait;
use mongodb::bson::DateTime;

use crate::domain::entities::tokens::refresh_token::RefreshToken;
use crate::errors::errors::SessionError;

/// 리프레시 토큰 저장소 계약
///
/// 모든 조회는 권위 있는 레코드를 반환해야 합니다 (stale 캐시 금지).
/// 구현체는 다음 두 가지 조건부 갱신 프리미티브를 반드시 제공해야 합니다:
///
/// - [`mark_replaced`](TokenStore::mark_replaced): `replaced_at`이 비어 있을
///   때만 성공하는 compare-and-set. 동시 회전 경쟁에서 정확히 한 요청만
///   이기도록 보장하는 유일한 장치입니다.
/// - [`mark_revoked`](TokenStore::mark_revoked): 이미 폐기된 레코드에는
///   아무 일도 하지 않는 멱등 갱신.
///
/// 저장소 장애는 [`SessionError::StoreUnavailable`]로만 보고해야 하며,
/// 레코드 삭제 연산은 의도적으로 존재하지 않습니다.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// ID로 토큰 레코드를 조회합니다.
    async fn find_by_id(&self, id: &str) -> Result<Option<RefreshToken>, SessionError>;

    /// 소유자의 모든 토큰 레코드를 조회합니다 (상태 무관, 전체 이력).
    async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<RefreshToken>, SessionError>;

    /// 특정 IP에서 발급된 모든 토큰 레코드를 조회합니다.
    async fn find_by_ip(&self, ip_address: &str) -> Result<Vec<RefreshToken>, SessionError>;

    /// 새 토큰 레코드를 저장합니다.
    async fn insert(&self, token: &RefreshToken) -> Result<(), SessionError>;

    /// 토큰을 후속 토큰으로 교체 처리합니다 (compare-and-set).
    ///
    /// `replaced_at`이 아직 비어 있는 경우에만 `replaced_at`/`replaced_by`를
    /// 원자적으로 설정합니다. 이미 교체된 레코드면 변경 없이 `false`를
    /// 반환합니다.
    async fn mark_replaced(
        &self,
        id: &str,
        successor_id: &str,
        at: DateTime,
    ) -> Result<bool, SessionError>;

    /// 토큰을 폐기 처리합니다 (멱등).
    ///
    /// 이미 폐기된 레코드면 최초 폐기 시각을 유지하고 `false`를 반환합니다.
    async fn mark_revoked(&self, id: &str, at: DateTime) -> Result<bool, SessionError>;
}
