//! Refresh Token Entity Implementation
//!
//! 세션 관리의 핵심 엔티티인 리프레시 토큰 레코드를 정의합니다.
//! 토큰은 한 번 생성되면 절대 삭제되지 않으며, `replace`/`revoke` 전이를 통해
//! 상태만 변경됩니다. 전체 레코드 이력이 탈취 감지(cascade)의 조회 기반이 됩니다.

use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 리프레시 토큰 기본 유효 기간 (2주)
pub const DEFAULT_DURATION_SECONDS: i64 = 14 * 24 * 60 * 60;

/// 리프레시 토큰 유효 기간 상한 (10년)
pub const MAX_DURATION_SECONDS: i64 = 10 * 365 * 24 * 60 * 60;

/// 토큰의 현재 상태 분류
///
/// 우선순위가 중요합니다: 오래되어 만료된 토큰이라도 이미 교체/폐기된 토큰이면
/// 재사용(탈취) 신호가 더 강하므로 `Revoked` > `AlreadyReplaced` > `Expired`
/// 순으로 판정합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenStatus {
    /// 사용 가능한 토큰
    Valid,
    /// 유효 기간이 지난 토큰 (탈취 신호 아님)
    Expired,
    /// 이미 후속 토큰으로 교체된 토큰 (재사용 = 탈취 신호)
    AlreadyReplaced,
    /// 로그아웃 또는 cascade로 폐기된 토큰
    Revoked,
}

/// 리프레시 토큰 레코드
///
/// 생성 시점의 필드(id, owner_id, created_at, duration_seconds, ip_address)는
/// 불변이며, `replaced_at`/`replaced_by`와 `revoked_at`만이 null → 값으로
/// 최대 한 번 전이합니다. 이 두 전이의 쓰기 권한은 세션 서브시스템이
/// 독점합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshToken {
    /// 토큰 고유 식별자 (UUID v4, 생성 후 불변)
    #[serde(rename = "_id")]
    pub id: String,
    /// 토큰 소유자(인증된 사용자) ID
    pub owner_id: String,
    /// 생성 시각 (밀리초 정밀도)
    pub created_at: DateTime,
    /// 유효 기간 (초 단위, 기본 2주, 최대 10년)
    pub duration_seconds: i64,
    /// 토큰을 발급시킨 요청의 네트워크 출처
    pub ip_address: String,
    /// 교체 시각 (`replaced_by`와 항상 함께 설정됨)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replaced_at: Option<DateTime>,
    /// 후속 토큰 ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replaced_by: Option<String>,
    /// 폐기 시각
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revoked_at: Option<DateTime>,
}

impl RefreshToken {
    /// 새 리프레시 토큰 생성
    ///
    /// 교체/폐기 필드가 모두 비어 있는 활성 상태로 시작합니다.
    /// 유효 기간 검증은 발급 경로(`issue`)에서 수행됩니다.
    pub fn new(owner_id: &str, ip_address: &str, duration_seconds: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            owner_id: owner_id.to_string(),
            created_at: DateTime::now(),
            duration_seconds,
            ip_address: ip_address.to_string(),
            replaced_at: None,
            replaced_by: None,
            revoked_at: None,
        }
    }

    /// 만료 시각 (Unix 밀리초)
    pub fn expire_at_millis(&self) -> i64 {
        self.created_at.timestamp_millis() + self.duration_seconds * 1000
    }

    /// 주어진 시각 기준 만료 여부
    pub fn is_expired_at(&self, now: DateTime) -> bool {
        now.timestamp_millis() > self.expire_at_millis()
    }

    /// 후속 토큰으로 교체되었는지 여부
    pub fn was_replaced(&self) -> bool {
        self.replaced_by.is_some()
    }

    /// 폐기되었는지 여부
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    /// 주어진 시각 기준 사용 가능 여부
    pub fn is_valid_at(&self, now: DateTime) -> bool {
        !self.is_expired_at(now) && !self.was_replaced() && !self.is_revoked()
    }

    /// 토큰 상태 분류 (순수 함수)
    ///
    /// 판정 순서는 고정입니다:
    /// 1. 폐기됨 → `Revoked`
    /// 2. 교체됨 → `AlreadyReplaced`
    /// 3. 만료됨 → `Expired`
    /// 4. 그 외 → `Valid`
    pub fn status_at(&self, now: DateTime) -> TokenStatus {
        if self.is_revoked() {
            TokenStatus::Revoked
        } else if self.was_replaced() {
            TokenStatus::AlreadyReplaced
        } else if self.is_expired_at(now) {
            TokenStatus::Expired
        } else {
            TokenStatus::Valid
        }
    }

    /// 후속 토큰으로 교체 처리
    ///
    /// `replaced_at`과 `replaced_by`를 함께 설정합니다. 이미 교체된 토큰에는
    /// 아무 변경도 하지 않고 `false`를 반환합니다 (재교체 금지 불변식).
    /// 영속 계층에서는 같은 조건의 compare-and-set으로 수행되어야 합니다.
    pub fn replace(&mut self, successor_id: &str, at: DateTime) -> bool {
        if self.replaced_at.is_some() {
            return false;
        }
        self.replaced_at = Some(at);
        self.replaced_by = Some(successor_id.to_string());
        true
    }

    /// 토큰 폐기 처리
    ///
    /// 이미 폐기된 토큰에 대한 재폐기는 오류가 아닌 no-op이며 `false`를
    /// 반환합니다.
    pub fn revoke(&mut self, at: DateTime) -> bool {
        if self.revoked_at.is_some() {
            return false;
        }
        self.revoked_at = Some(at);
        true
    }
}

/// 유효 기간이 허용 범위(양수, 10년 이하)인지 확인
pub fn duration_in_bounds(duration_seconds: i64) -> bool {
    duration_seconds > 0 && duration_seconds <= MAX_DURATION_SECONDS
}
