//! # 리프레시 토큰 리포지토리 구현
//!
//! 리프레시 토큰 레코드의 데이터 액세스 계층을 담당하는 리포지토리입니다.
//! MongoDB를 저장소로 사용하며, [`TokenStore`] 계약을 구현합니다.
//!
//! ## 특징
//!
//! - **자동 의존성 주입**: 싱글톤 매크로를 통한 DI
//! - **조건부 갱신**: 교체(CAS)/폐기(멱등)를 MongoDB 필터로 원자적으로 수행
//! - **캐시 없음**: 분류와 CAS는 항상 권위 있는 레코드를 읽어야 하므로
//!   조회 캐싱을 일부러 두지 않습니다
//! - **삭제 없음**: 레코드는 상태 필드로만 마킹되며 물리적으로 삭제되지 않습니다

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    IndexModel,
    bson::{DateTime, doc},
    options::IndexOptions,
};
use singleton_macro::repository;

use crate::{
    core::registry::Repository,
    db::Database,
    domain::entities::tokens::refresh_token::RefreshToken,
    errors::errors::{AppError, SessionError},
};

use super::token_store::TokenStore;

/// 리프레시 토큰 데이터 액세스 리포지토리
///
/// `refresh_tokens` 컬렉션에 대한 모든 MongoDB 연산을 담당합니다.
///
/// ## 인덱스
///
/// - `owner_id` (오름차순): cascade의 소유자 일치 조회
/// - `ip_address` (오름차순): cascade의 IP 일치 조회
/// - `created_at` (내림차순): 최근 발급 순 감사 조회
///
/// ## 에러 처리
///
/// MongoDB 오류는 전부 [`SessionError::StoreUnavailable`]로 변환됩니다.
/// 저장소 장애가 인증 실패(401)로 위장되는 일이 없도록 하기 위함입니다.
///
/// ## 사용 예제
///
/// ```rust,ignore
/// use crate::repositories::tokens::token_repository::TokenRepository;
///
/// let repo = TokenRepository::instance();
/// let token = repo.find_by_id("b1f9c2aa-...").await?;
/// ```
#[repository(name = "token", collection = "refresh_tokens")]
pub struct TokenRepository {
    /// MongoDB 데이터베이스 연결
    ///
    /// 자동 주입되는 데이터베이스 컴포넌트입니다.
    /// `refresh_tokens` 컬렉션에 대한 모든 MongoDB 연산을 담당합니다.
    db: Arc<Database>,
}

#[async_trait]
impl TokenStore for TokenRepository {
    /// ID로 토큰 레코드 조회
    async fn find_by_id(&self, id: &str) -> Result<Option<RefreshToken>, SessionError> {
        self.collection::<RefreshToken>()
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| SessionError::StoreUnavailable(e.to_string()))
    }

    /// 소유자의 전체 토큰 이력 조회
    ///
    /// 상태와 무관하게 해당 소유자의 모든 레코드를 반환합니다.
    /// cascade가 이미 폐기된 레코드를 건너뛰는 판단은 호출자 몫입니다.
    async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<RefreshToken>, SessionError> {
        let cursor = self
            .collection::<RefreshToken>()
            .find(doc! { "owner_id": owner_id })
            .await
            .map_err(|e| SessionError::StoreUnavailable(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| SessionError::StoreUnavailable(e.to_string()))
    }

    /// 특정 IP에서 발급된 전체 토큰 이력 조회
    async fn find_by_ip(&self, ip_address: &str) -> Result<Vec<RefreshToken>, SessionError> {
        let cursor = self
            .collection::<RefreshToken>()
            .find(doc! { "ip_address": ip_address })
            .await
            .map_err(|e| SessionError::StoreUnavailable(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| SessionError::StoreUnavailable(e.to_string()))
    }

    /// 새 토큰 레코드 저장
    async fn insert(&self, token: &RefreshToken) -> Result<(), SessionError> {
        self.collection::<RefreshToken>()
            .insert_one(token)
            .await
            .map_err(|e| SessionError::StoreUnavailable(e.to_string()))?;

        Ok(())
    }

    /// 토큰 교체 처리 (compare-and-set)
    ///
    /// 필터에 `replaced_at: null`을 포함시켜 "아직 교체되지 않은 경우에만"
    /// 갱신이 적용되도록 합니다. 엔티티가 `replaced_at`을 직렬화에서
    /// 생략하므로 null 필터는 미설정 필드와 일치합니다. 동시 회전 경쟁에서
    /// MongoDB의 단일 문서 원자성이 정확히 한 요청만 이기게 합니다.
    async fn mark_replaced(
        &self,
        id: &str,
        successor_id: &str,
        at: DateTime,
    ) -> Result<bool, SessionError> {
        let result = self
            .collection::<RefreshToken>()
            .update_one(
                doc! { "_id": id, "replaced_at": null },
                doc! { "$set": { "replaced_at": at, "replaced_by": successor_id } },
            )
            .await
            .map_err(|e| SessionError::StoreUnavailable(e.to_string()))?;

        Ok(result.modified_count > 0)
    }

    /// 토큰 폐기 처리 (멱등)
    ///
    /// `revoked_at: null` 필터 덕분에 이미 폐기된 레코드는 최초 폐기 시각을
    /// 그대로 유지합니다.
    async fn mark_revoked(&self, id: &str, at: DateTime) -> Result<bool, SessionError> {
        let result = self
            .collection::<RefreshToken>()
            .update_one(
                doc! { "_id": id, "revoked_at": null },
                doc! { "$set": { "revoked_at": at } },
            )
            .await
            .map_err(|e| SessionError::StoreUnavailable(e.to_string()))?;

        Ok(result.modified_count > 0)
    }
}

impl TokenRepository {
    /// 데이터베이스 인덱스 생성
    ///
    /// cascade의 두 가지 상관관계 조회(소유자 일치, IP 일치)가 컬렉션
    /// 풀스캔이 되지 않도록 보조 인덱스를 생성합니다.
    /// 애플리케이션 초기화 시점에 한 번 실행됩니다.
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let collection = self.collection::<RefreshToken>();

        // 소유자 조회 인덱스
        let owner_index = IndexModel::builder()
            .keys(doc! { "owner_id": 1 })
            .options(IndexOptions::builder().name("owner_id_asc".to_string()).build())
            .build();

        // IP 조회 인덱스
        let ip_index = IndexModel::builder()
            .keys(doc! { "ip_address": 1 })
            .options(
                IndexOptions::builder()
                    .name("ip_address_asc".to_string())
                    .build(),
            )
            .build();

        // 생성일 인덱스
        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("created_at_desc".to_string())
                    .build(),
            )
            .build();

        collection
            .create_indexes([owner_index, ip_index, created_at_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
