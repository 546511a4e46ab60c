//! 세션 생명주기 서비스 구현
//!
//! 리프레시 토큰 세션의 핵심 프로토콜을 담당합니다:
//!
//! - **발급(issue)**: 로그인 시 새 토큰 레코드 생성
//! - **회전(rotate)**: 리프레시 요청마다 토큰을 일회용으로 소모하고 후속 토큰 발급
//! - **탈취 대응(cascade)**: 비활성 토큰의 재사용이 감지되면 소유자/IP로
//!   상관된 세션을 일괄 폐기
//!
//! 프로토콜 로직은 [`TokenStore`] 계약에 대한 자유 함수로 구현되어 있어
//! MongoDB 없이 인메모리 저장소로 전체 시나리오를 테스트할 수 있습니다.
//! [`SessionService`]는 이 함수들을 싱글톤 DI 계층에 연결하는 얇은 껍데기입니다.

use std::collections::HashSet;
use std::sync::Arc;

use log::{debug, info, warn};
use mongodb::bson::DateTime;
use singleton_macro::service;

use crate::config::SessionConfig;
use crate::domain::entities::tokens::refresh_token::{
    RefreshToken, TokenStatus, duration_in_bounds,
};
use crate::errors::errors::{AppError, SessionError};
use crate::repositories::tokens::token_repository::TokenRepository;
use crate::repositories::tokens::token_store::TokenStore;
use crate::services::auth::token_service::TokenService;

/// 새 리프레시 토큰 발급
///
/// 유효 기간을 검증한 뒤 활성 상태의 새 레코드를 저장합니다.
/// 같은 소유자의 기존 토큰에는 아무 영향이 없습니다 (로그인마다 독립 세션).
pub async fn issue(
    store: &dyn TokenStore,
    owner_id: &str,
    ip_address: &str,
    duration_seconds: i64,
) -> Result<RefreshToken, SessionError> {
    if !duration_in_bounds(duration_seconds) {
        return Err(SessionError::InvalidDuration(duration_seconds));
    }

    let token = RefreshToken::new(owner_id, ip_address, duration_seconds);
    store.insert(&token).await?;

    debug!(
        "refresh token issued: id={} owner={} ttl={}s",
        token.id, owner_id, duration_seconds
    );
    Ok(token)
}

/// 탈취 대응 일괄 폐기 (breach cascade)
///
/// 훼손된 레코드와 **소유자가 같거나 발급 IP가 같은** 모든 레코드의
/// 합집합(ID 기준 중복 제거)을 폐기합니다. 훼손된 레코드 자신도 소유자
/// 일치로 포함됩니다. `mark_revoked`가 멱등이므로 이미 폐기된 레코드는
/// 최초 폐기 시각을 유지하며, cascade를 반복 수행해도 결과가 같습니다.
///
/// 폐기된 레코드 수를 반환합니다 (이번 호출로 새로 폐기된 것만 집계).
pub async fn cascade(
    store: &dyn TokenStore,
    compromised: &RefreshToken,
) -> Result<usize, SessionError> {
    let now = DateTime::now();

    // 두 건의 인덱스 조회를 ID로 합집합 (전체 스캔 금지)
    let mut correlated = store.find_by_owner(&compromised.owner_id).await?;
    correlated.extend(store.find_by_ip(&compromised.ip_address).await?);

    let mut seen = HashSet::new();
    let mut revoked_count = 0usize;

    for token in &correlated {
        if !seen.insert(token.id.clone()) {
            continue;
        }
        if store.mark_revoked(&token.id, now).await? {
            revoked_count += 1;
        }
    }

    warn!(
        "🚨 breach cascade: compromised={} owner={} ip={} correlated={} newly_revoked={}",
        compromised.id,
        compromised.owner_id,
        compromised.ip_address,
        seen.len(),
        revoked_count
    );
    Ok(revoked_count)
}

/// 리프레시 토큰 회전
///
/// 분류 우선순위(Revoked > AlreadyReplaced > Expired > Valid)에 따라:
///
/// - `Revoked` / `AlreadyReplaced`: 탈취 신호 — cascade를 **완료한 후**
///   실패를 반환합니다.
/// - `Expired`: 단순 만료 — cascade 없이 거부합니다 (만료는 탈취 증거가 아님).
/// - `Valid`: 후속 토큰을 저장한 뒤 `replaced_at`이 비어 있는 경우에만
///   성공하는 compare-and-set으로 교체를 확정합니다.
///
/// CAS에서 진 요청(분류와 확정 사이에 다른 요청이 먼저 교체한 경우)은
/// 재사용과 동일하게 취급됩니다: 이미 저장된 패자의 후속 토큰은 삭제하지
/// 않고(레코드는 삭제되지 않음) cascade가 소유자 일치로 함께 폐기합니다.
///
/// 후속 토큰은 **현재 요청의 IP**로 기록되고 이전 토큰의 유효 기간을
/// 이어받습니다.
pub async fn rotate(
    store: &dyn TokenStore,
    token_id: &str,
    current_ip: &str,
) -> Result<RefreshToken, SessionError> {
    let record = store
        .find_by_id(token_id)
        .await?
        .ok_or(SessionError::NotFound)?;

    let now = DateTime::now();
    match record.status_at(now) {
        TokenStatus::Revoked => {
            // 응답을 돌려주기 전에 cascade가 완료되어야 함
            cascade(store, &record).await?;
            Err(SessionError::AlreadyRevoked)
        }
        TokenStatus::AlreadyReplaced => {
            cascade(store, &record).await?;
            Err(SessionError::Reused)
        }
        TokenStatus::Expired => Err(SessionError::Expired),
        TokenStatus::Valid => {
            let successor = issue(
                store,
                &record.owner_id,
                current_ip,
                record.duration_seconds,
            )
            .await?;

            if store
                .mark_replaced(&record.id, &successor.id, DateTime::now())
                .await?
            {
                info!(
                    "refresh token rotated: {} -> {} (owner={})",
                    record.id, successor.id, record.owner_id
                );
                Ok(successor)
            } else {
                // 분류와 CAS 사이에 다른 요청이 먼저 교체함 — 재사용으로 취급.
                // 최신 레코드를 다시 읽어 cascade 기준으로 사용합니다.
                let latest = store.find_by_id(&record.id).await?.unwrap_or(record);
                cascade(store, &latest).await?;
                Err(SessionError::Reused)
            }
        }
    }
}

/// 세션 생명주기 서비스
///
/// 핸들러 계층에 로그인/갱신/로그아웃 API를 제공합니다.
/// 프로토콜 로직 자체는 위의 자유 함수들에 위임합니다.
#[service(name = "session")]
pub struct SessionService {
    /// 토큰 저장소 (자동 주입)
    token_repository: Arc<TokenRepository>,
    /// 액세스 토큰 발급 협력자 (자동 주입)
    token_service: Arc<TokenService>,
}

impl SessionService {
    /// 로그인: 인증된 사용자에게 새 리프레시 토큰 발급
    ///
    /// 자격 증명 검증은 호출자(외부 협력자) 책임이며, 여기서는 이미 인증된
    /// `owner_id`에 대한 세션 생성만 담당합니다. `duration_override`가 없으면
    /// 설정된 기본 유효 기간(2주)을 사용합니다.
    pub async fn login(
        &self,
        owner_id: &str,
        ip_address: &str,
        duration_override: Option<i64>,
    ) -> Result<RefreshToken, AppError> {
        let duration_seconds =
            duration_override.unwrap_or_else(SessionConfig::refresh_duration_seconds);

        let token = issue(
            self.token_repository.as_ref(),
            owner_id,
            ip_address,
            duration_seconds,
        )
        .await?;

        info!("session created: owner={} token={}", owner_id, token.id);
        Ok(token)
    }

    /// 갱신: 리프레시 토큰 회전 + 새 액세스 토큰 발급
    ///
    /// 실패의 구체적 사유(NotFound/Expired/Reused/AlreadyRevoked)는 서버
    /// 로그에만 남고, 클라이언트는 구분할 수 없는 단일 401을 받습니다.
    pub async fn refresh(
        &self,
        token_id: &str,
        ip_address: &str,
    ) -> Result<(String, RefreshToken), AppError> {
        let successor = rotate(self.token_repository.as_ref(), token_id, ip_address)
            .await
            .map_err(|e| {
                if e.is_auth_failure() {
                    warn!("refresh rejected: token={} reason={}", token_id, e);
                }
                AppError::from(e)
            })?;

        let access_token = self.token_service.mint(&successor.owner_id)?;
        Ok((access_token, successor))
    }

    /// 로그아웃: 단일 토큰 폐기
    ///
    /// cascade를 **절대** 수행하지 않습니다 — 자발적 로그아웃은 탈취 신호가
    /// 아니며, 다른 기기의 세션은 영향받지 않아야 합니다. 폐기는 멱등이므로
    /// 이미 폐기된 토큰의 로그아웃도 성공으로 처리하고, 존재하지 않는 ID만
    /// 404로 거부합니다.
    pub async fn logout(&self, token_id: &str) -> Result<(), AppError> {
        let record = self
            .token_repository
            .find_by_id(token_id)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| AppError::NotFound("session not found".to_string()))?;

        self.token_repository
            .mark_revoked(&record.id, DateTime::now())
            .await
            .map_err(AppError::from)?;

        info!("session revoked by logout: token={}", record.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;

    const WEEK_SECONDS: i64 = 7 * 24 * 60 * 60;

    /// 프로토콜 테스트용 인메모리 토큰 저장소
    ///
    /// MongoDB 구현체와 동일한 조건부 갱신 의미론(교체 CAS, 멱등 폐기)을
    /// 제공합니다.
    struct InMemoryTokenStore {
        records: Mutex<HashMap<String, RefreshToken>>,
    }

    impl InMemoryTokenStore {
        fn new() -> Self {
            Self {
                records: Mutex::new(HashMap::new()),
            }
        }

        fn get(&self, id: &str) -> Option<RefreshToken> {
            self.records.lock().unwrap().get(id).cloned()
        }
    }

    #[async_trait]
    impl TokenStore for InMemoryTokenStore {
        async fn find_by_id(&self, id: &str) -> Result<Option<RefreshToken>, SessionError> {
            Ok(self.get(id))
        }

        async fn find_by_owner(
            &self,
            owner_id: &str,
        ) -> Result<Vec<RefreshToken>, SessionError> {
            Ok(self
                .records
                .lock()
                .unwrap()
                .values()
                .filter(|t| t.owner_id == owner_id)
                .cloned()
                .collect())
        }

        async fn find_by_ip(&self, ip_address: &str) -> Result<Vec<RefreshToken>, SessionError> {
            Ok(self
                .records
                .lock()
                .unwrap()
                .values()
                .filter(|t| t.ip_address == ip_address)
                .cloned()
                .collect())
        }

        async fn insert(&self, token: &RefreshToken) -> Result<(), SessionError> {
            self.records
                .lock()
                .unwrap()
                .insert(token.id.clone(), token.clone());
            Ok(())
        }

        async fn mark_replaced(
            &self,
            id: &str,
            successor_id: &str,
            at: DateTime,
        ) -> Result<bool, SessionError> {
            let mut records = self.records.lock().unwrap();
            match records.get_mut(id) {
                Some(token) => Ok(token.replace(successor_id, at)),
                None => Ok(false),
            }
        }

        async fn mark_revoked(&self, id: &str, at: DateTime) -> Result<bool, SessionError> {
            let mut records = self.records.lock().unwrap();
            match records.get_mut(id) {
                Some(token) => Ok(token.revoke(at)),
                None => Ok(false),
            }
        }
    }

    /// CAS 경쟁 시뮬레이션용 저장소 래퍼
    ///
    /// 첫 `mark_replaced` 호출 직전에 경쟁 요청이 먼저 교체를 확정한
    /// 상황(분류는 Valid였지만 CAS 시점에는 이미 교체됨)을 재현합니다.
    struct ContendedStore {
        inner: InMemoryTokenStore,
        contended_id: String,
        rival_won: AtomicBool,
    }

    #[async_trait]
    impl TokenStore for ContendedStore {
        async fn find_by_id(&self, id: &str) -> Result<Option<RefreshToken>, SessionError> {
            self.inner.find_by_id(id).await
        }

        async fn find_by_owner(
            &self,
            owner_id: &str,
        ) -> Result<Vec<RefreshToken>, SessionError> {
            self.inner.find_by_owner(owner_id).await
        }

        async fn find_by_ip(&self, ip_address: &str) -> Result<Vec<RefreshToken>, SessionError> {
            self.inner.find_by_ip(ip_address).await
        }

        async fn insert(&self, token: &RefreshToken) -> Result<(), SessionError> {
            self.inner.insert(token).await
        }

        async fn mark_replaced(
            &self,
            id: &str,
            successor_id: &str,
            at: DateTime,
        ) -> Result<bool, SessionError> {
            if id == self.contended_id && !self.rival_won.swap(true, Ordering::SeqCst) {
                // 경쟁 요청이 먼저 끼어들어 교체를 확정
                let rival = issue(&self.inner, "owner-race", "10.9.9.9", WEEK_SECONDS).await?;
                assert!(self.inner.mark_replaced(id, &rival.id, at).await?);
            }
            self.inner.mark_replaced(id, successor_id, at).await
        }

        async fn mark_revoked(&self, id: &str, at: DateTime) -> Result<bool, SessionError> {
            self.inner.mark_revoked(id, at).await
        }
    }

    fn backdate(store: &InMemoryTokenStore, id: &str, millis_ago: i64) {
        let mut records = store.records.lock().unwrap();
        let token = records.get_mut(id).unwrap();
        token.created_at =
            DateTime::from_millis(DateTime::now().timestamp_millis() - millis_ago);
    }

    #[actix_web::test]
    async fn test_issue_rejects_out_of_range_duration() {
        let store = InMemoryTokenStore::new();

        for bad in [0, -1, 315_360_000 + 1] {
            let result = issue(&store, "owner-1", "10.0.0.1", bad).await;
            assert_eq!(result.unwrap_err(), SessionError::InvalidDuration(bad));
        }

        // 경계값은 허용
        assert!(issue(&store, "owner-1", "10.0.0.1", 315_360_000).await.is_ok());
        assert!(issue(&store, "owner-1", "10.0.0.1", 1).await.is_ok());
    }

    #[actix_web::test]
    async fn test_rotate_builds_replacement_chain() {
        let store = InMemoryTokenStore::new();
        let first = issue(&store, "owner-1", "10.0.0.1", WEEK_SECONDS).await.unwrap();

        // 다른 네트워크에서 갱신
        let second = rotate(&store, &first.id, "10.0.0.2").await.unwrap();

        // 이전 토큰: 교체 확정, 생성 시점 필드는 불변
        let stored_first = store.get(&first.id).unwrap();
        assert_eq!(stored_first.replaced_by.as_deref(), Some(second.id.as_str()));
        assert!(stored_first.replaced_at.is_some());
        assert!(stored_first.revoked_at.is_none());
        assert_eq!(stored_first.ip_address, "10.0.0.1");

        // 후속 토큰: 같은 소유자, 현재 요청 IP, 유효 기간 승계, 활성 상태
        assert_eq!(second.owner_id, "owner-1");
        assert_eq!(second.ip_address, "10.0.0.2");
        assert_eq!(second.duration_seconds, WEEK_SECONDS);
        let now = DateTime::now();
        assert_eq!(store.get(&second.id).unwrap().status_at(now), TokenStatus::Valid);

        // 이전 토큰은 더 이상 회전 불가 (재사용 탐지)
        let result = rotate(&store, &first.id, "10.0.0.2").await;
        assert_eq!(result.unwrap_err(), SessionError::Reused);
    }

    #[actix_web::test]
    async fn test_rotate_unknown_id_is_not_found() {
        let store = InMemoryTokenStore::new();
        let result = rotate(&store, "no-such-token", "10.0.0.1").await;
        assert_eq!(result.unwrap_err(), SessionError::NotFound);
    }

    #[actix_web::test]
    async fn test_expired_token_rejects_without_cascade() {
        let store = InMemoryTokenStore::new();
        let expired = issue(&store, "owner-1", "10.0.0.1", 3600).await.unwrap();
        let sibling = issue(&store, "owner-1", "10.0.0.1", WEEK_SECONDS).await.unwrap();
        backdate(&store, &expired.id, 2 * 3_600_000);

        let result = rotate(&store, &expired.id, "10.0.0.1").await;
        assert_eq!(result.unwrap_err(), SessionError::Expired);

        // 만료는 탈취 증거가 아님: 같은 소유자/IP의 형제 세션은 그대로 유효
        let now = DateTime::now();
        assert_eq!(store.get(&sibling.id).unwrap().status_at(now), TokenStatus::Valid);
        // 만료된 레코드 자체도 폐기되지 않음
        assert!(store.get(&expired.id).unwrap().revoked_at.is_none());
    }

    /// 기준 시나리오: `used`(교체됨, owner=U4), `valid1`(owner=U4),
    /// `valid2`(owner=U2, `used`와 IP 공유), `valid3`(owner=U2, 다른 IP).
    /// `used`로 갱신을 시도하면 valid1(소유자 일치)과 valid2(IP 일치)는
    /// 폐기되고 valid3은 살아남아야 합니다.
    #[actix_web::test]
    async fn test_reuse_cascades_by_owner_and_ip_union() {
        let store = InMemoryTokenStore::new();

        let used = issue(&store, "U4", "203.0.113.7", WEEK_SECONDS).await.unwrap();
        let valid1 = issue(&store, "U4", "198.51.100.1", WEEK_SECONDS).await.unwrap();
        let valid2 = issue(&store, "U2", "203.0.113.7", WEEK_SECONDS).await.unwrap();
        let valid3 = issue(&store, "U2", "198.51.100.9", WEEK_SECONDS).await.unwrap();

        // used를 정상 회전시켜 "이미 교체됨" 상태로 만듦
        let successor = rotate(&store, &used.id, "203.0.113.7").await.unwrap();

        // 교체된 토큰의 재사용 → 탈취 신호
        let result = rotate(&store, &used.id, "203.0.113.7").await;
        assert_eq!(result.unwrap_err(), SessionError::Reused);

        assert!(store.get(&valid1.id).unwrap().revoked_at.is_some());
        assert!(store.get(&valid2.id).unwrap().revoked_at.is_some());
        assert!(store.get(&valid3.id).unwrap().revoked_at.is_none());
        // 훼손된 레코드 자신과 그 후속 토큰(소유자 일치)도 폐기됨
        assert!(store.get(&used.id).unwrap().revoked_at.is_some());
        assert!(store.get(&successor.id).unwrap().revoked_at.is_some());
    }

    #[actix_web::test]
    async fn test_revoked_token_reuse_also_cascades() {
        let store = InMemoryTokenStore::new();
        let revoked = issue(&store, "owner-1", "10.0.0.1", WEEK_SECONDS).await.unwrap();
        let sibling = issue(&store, "owner-1", "10.0.0.2", WEEK_SECONDS).await.unwrap();

        store.mark_revoked(&revoked.id, DateTime::now()).await.unwrap();

        let result = rotate(&store, &revoked.id, "10.0.0.1").await;
        assert_eq!(result.unwrap_err(), SessionError::AlreadyRevoked);

        // 소유자 일치로 형제 세션까지 폐기됨
        assert!(store.get(&sibling.id).unwrap().revoked_at.is_some());
    }

    #[actix_web::test]
    async fn test_cascade_is_idempotent() {
        let store = InMemoryTokenStore::new();
        let compromised = issue(&store, "owner-1", "10.0.0.1", WEEK_SECONDS).await.unwrap();
        let peer = issue(&store, "owner-1", "10.0.0.2", WEEK_SECONDS).await.unwrap();

        let first_run = cascade(&store, &compromised).await.unwrap();
        assert_eq!(first_run, 2);

        let peer_revoked_at = store.get(&peer.id).unwrap().revoked_at;

        // 두 번째 실행: 새로 폐기되는 레코드 없음, 최초 폐기 시각 유지
        let second_run = cascade(&store, &compromised).await.unwrap();
        assert_eq!(second_run, 0);
        assert_eq!(store.get(&peer.id).unwrap().revoked_at, peer_revoked_at);
    }

    #[actix_web::test]
    async fn test_double_submit_loser_gets_reused_and_cascade() {
        let inner = InMemoryTokenStore::new();
        let contended = issue(&inner, "owner-race", "10.0.0.1", WEEK_SECONDS).await.unwrap();
        let store = ContendedStore {
            inner,
            contended_id: contended.id.clone(),
            rival_won: AtomicBool::new(false),
        };

        // 분류 시점에는 Valid였지만 CAS 직전에 경쟁 요청이 먼저 교체함
        let result = rotate(&store, &contended.id, "10.0.0.2").await;
        assert_eq!(result.unwrap_err(), SessionError::Reused);

        // 승자의 교체만 확정되어 있음
        let stored = store.inner.get(&contended.id).unwrap();
        assert!(stored.replaced_by.is_some());

        // 패자가 저장했던 후속 토큰을 포함해 소유자의 모든 세션이 폐기됨
        let owner_tokens = store.inner.find_by_owner("owner-race").await.unwrap();
        assert!(owner_tokens.len() >= 3); // 원본 + 승자 후속 + 패자 후속
        for token in owner_tokens {
            assert!(token.revoked_at.is_some(), "token {} should be revoked", token.id);
        }
    }

    #[actix_web::test]
    async fn test_logout_revokes_only_the_target() {
        let store = InMemoryTokenStore::new();
        let target = issue(&store, "owner-1", "10.0.0.1", WEEK_SECONDS).await.unwrap();
        let same_owner = issue(&store, "owner-1", "10.0.0.1", WEEK_SECONDS).await.unwrap();
        let same_ip = issue(&store, "owner-2", "10.0.0.1", WEEK_SECONDS).await.unwrap();

        // 로그아웃은 단일 폐기이며 cascade하지 않음
        assert!(store.mark_revoked(&target.id, DateTime::now()).await.unwrap());

        let now = DateTime::now();
        assert_eq!(store.get(&target.id).unwrap().status_at(now), TokenStatus::Revoked);
        assert_eq!(store.get(&same_owner.id).unwrap().status_at(now), TokenStatus::Valid);
        assert_eq!(store.get(&same_ip.id).unwrap().status_at(now), TokenStatus::Valid);

        // 재폐기는 no-op
        assert!(!store.mark_revoked(&target.id, DateTime::now()).await.unwrap());
    }

    #[actix_web::test]
    async fn test_records_are_never_deleted() {
        let store = InMemoryTokenStore::new();
        let first = issue(&store, "owner-1", "10.0.0.1", WEEK_SECONDS).await.unwrap();
        let second = rotate(&store, &first.id, "10.0.0.1").await.unwrap();

        // 재사용으로 cascade까지 발생시킨 뒤에도 전체 이력이 남아 있어야 함
        let _ = rotate(&store, &first.id, "10.0.0.1").await;

        assert!(store.get(&first.id).is_some());
        assert!(store.get(&second.id).is_some());
        assert_eq!(store.records.lock().unwrap().len(), 2);
    }
}
