//! # 사용자 리포지토리 구현
//!
//! 사용자 엔티티의 데이터 액세스 계층을 담당하는 리포지토리입니다.
//! MongoDB를 주 저장소로 사용하고, Redis를 통한 캐싱을 지원합니다.
//!
//! ## 특징
//!
//! - **하이브리드 스토리지**: MongoDB + Redis 캐싱
//! - **원자적 집합 갱신**: 역할, 클레임, 로그인, 친구는 `$addToSet`/`$pull`로 갱신
//! - **데이터 무결성**: email, username 유니크 인덱스

use std::sync::Arc;

use mongodb::bson::{doc, oid::ObjectId, to_bson, Bson, DateTime, Document};
use mongodb::options::{IndexOptions, UpdateOptions};
use mongodb::IndexModel;
use singleton_macro::repository;

use crate::caching::redis::RedisClient;
use crate::config::CacheConfig;
use crate::core::registry::Repository;
use crate::db::Database;
use crate::domain::entities::products::RatingSummary;
use crate::domain::entities::users::{User, UserClaim, UserLogin, UserProductDescription};
use crate::errors::errors::AppError;
use crate::repositories::{collect, db_error, inserted_object_id, is_duplicate_key, parse_object_id};

/// 사용자 데이터 액세스 리포지토리
///
/// ## 캐싱 전략
///
/// - **키 패턴**: `user_repository:{user_id}`
/// - **TTL**: `CacheConfig::ttl_seconds()`
/// - 모든 쓰기 연산 후 해당 사용자 키를 무효화합니다.
/// - 역할 이름을 일괄 변경/삭제할 때는 `user_repository:*` 패턴 전체를 무효화합니다.
///
/// ## 에러 처리
///
/// - **DatabaseError**: MongoDB 연결 오류, 쿼리 실행 오류
/// - **ValidationError**: 잘못된 ObjectId 형식
/// - **ConflictError**: 이메일/사용자명 중복
#[repository(name = "user", collection = "users")]
pub struct UserRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl UserRepository {
    /// 레지스트리를 거치지 않고 직접 구성합니다. 통합 테스트에서 사용합니다.
    pub fn with_dependencies(db: Arc<Database>, redis: Arc<RedisClient>) -> Self {
        Self { db, redis }
    }

    /// 모든 사용자 캐시 키를 지웁니다.
    async fn invalidate_all_cached(&self) {
        let _ = self.invalidate_pattern_cache(&self.cache_key("*")).await;
    }

    fn to_bson_value<T: serde::Serialize>(value: &T) -> Result<Bson, AppError> {
        to_bson(value).map_err(|e| AppError::InternalError(format!("BSON 직렬화 실패: {}", e)))
    }

    /// `_id`로 찾은 문서에 업데이트를 적용하고 `modified_at`을 기록합니다.
    ///
    /// 문서가 존재했는지 여부를 반환합니다.
    async fn update_by_id(&self, id: &ObjectId, mut update: Document) -> Result<bool, AppError> {
        let stamp = doc! { "modified_at": DateTime::now() };
        match update.get_document_mut("$set") {
            Ok(set) => set.extend(stamp),
            Err(_) => {
                update.insert("$set", stamp);
            }
        }

        let result = self.collection::<User>()
            .update_one(doc! { "_id": id }, update)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    AppError::ConflictError("이메일 또는 사용자명이 이미 사용 중입니다".to_string())
                } else {
                    db_error(e)
                }
            })?;

        let _ = self.invalidate_cache(&id.to_hex()).await;
        Ok(result.matched_count > 0)
    }

    /// ID로 사용자 조회 (캐시 우선)
    ///
    /// # 반환값
    ///
    /// * `Ok(Some(User))` - 사용자를 찾은 경우
    /// * `Ok(None)` - 해당 ID의 사용자가 없는 경우
    /// * `Err(AppError::ValidationError)` - ID 형식 오류
    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let object_id = parse_object_id(id)?;
        let cache_key = self.cache_key(id);

        if let Ok(Some(cached)) = self.redis.get::<User>(&cache_key).await {
            return Ok(Some(cached));
        }

        let user = self.collection::<User>()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(db_error)?;

        if let Some(ref user) = user {
            let _ = self.redis
                .set_with_expiry(&cache_key, user, CacheConfig::ttl_seconds())
                .await;
        }

        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.collection::<User>()
            .find_one(doc! { "email": email.trim().to_lowercase() })
            .await
            .map_err(db_error)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        self.collection::<User>()
            .find_one(doc! { "username": username.trim() })
            .await
            .map_err(db_error)
    }

    pub async fn find_all(&self) -> Result<Vec<User>, AppError> {
        let cursor = self.collection::<User>()
            .find(doc! {})
            .sort(doc! { "created_at": 1 })
            .await
            .map_err(db_error)?;
        collect(cursor).await
    }

    /// 해당 역할을 가진 모든 사용자
    pub async fn find_by_role(&self, role: &str) -> Result<Vec<User>, AppError> {
        let cursor = self.collection::<User>()
            .find(doc! { "roles": role })
            .await
            .map_err(db_error)?;
        collect(cursor).await
    }

    /// 여러 ID의 사용자를 한 번에 조회합니다. 없는 ID는 무시됩니다.
    pub async fn find_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<User>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let cursor = self.collection::<User>()
            .find(doc! { "_id": { "$in": ids } })
            .await
            .map_err(db_error)?;
        collect(cursor).await
    }

    pub async fn is_email_available(&self, email: &str) -> Result<bool, AppError> {
        let count = self.collection::<User>()
            .count_documents(doc! { "email": email.trim().to_lowercase() })
            .await
            .map_err(db_error)?;
        Ok(count == 0)
    }

    pub async fn is_username_available(&self, username: &str) -> Result<bool, AppError> {
        let count = self.collection::<User>()
            .count_documents(doc! { "username": username.trim() })
            .await
            .map_err(db_error)?;
        Ok(count == 0)
    }

    /// 새 사용자 생성
    ///
    /// 이메일은 소문자로 정규화되며, `created_at`은 저장 시점으로 기록됩니다.
    pub async fn insert(&self, mut user: User) -> Result<User, AppError> {
        user.email = user.email.trim().to_lowercase();
        user.created_at = DateTime::now();
        user.modified_at = None;

        let result = self.collection::<User>()
            .insert_one(&user)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    AppError::ConflictError("이메일 또는 사용자명이 이미 사용 중입니다".to_string())
                } else {
                    db_error(e)
                }
            })?;

        user.id = Some(inserted_object_id(&result)?);
        log::info!("👤 User created: {}", user.username);
        Ok(user)
    }

    /// 프로필 필드만 갱신합니다.
    ///
    /// email, username, password_hash, created_at은 이 경로로 바뀌지 않습니다.
    pub async fn update_profile(
        &self,
        id: &ObjectId,
        phone_number: Option<String>,
        email_confirmed: Option<bool>,
    ) -> Result<bool, AppError> {
        let mut set = doc! { "phone_number": phone_number };
        if let Some(confirmed) = email_confirmed {
            set.insert("email_confirmed", confirmed);
        }

        self.update_by_id(id, doc! { "$set": set }).await
    }

    /// 이메일 변경. 이미 사용 중인 이메일이면 false.
    pub async fn update_email(&self, id: &ObjectId, email: &str) -> Result<bool, AppError> {
        let email = email.trim().to_lowercase();
        if !self.is_email_available(&email).await? {
            return Ok(false);
        }

        self.update_by_id(id, doc! { "$set": { "email": email, "email_confirmed": false } }).await
    }

    /// 사용자명 변경. 이미 사용 중인 이름이면 false.
    pub async fn update_username(&self, id: &ObjectId, username: &str) -> Result<bool, AppError> {
        let username = username.trim();
        if !self.is_username_available(username).await? {
            return Ok(false);
        }

        self.update_by_id(id, doc! { "$set": { "username": username } }).await
    }

    pub async fn update_password_hash(&self, id: &ObjectId, password_hash: &str) -> Result<bool, AppError> {
        self.update_by_id(id, doc! { "$set": { "password_hash": password_hash } }).await
    }

    pub async fn add_role(&self, id: &ObjectId, role: &str) -> Result<bool, AppError> {
        self.update_by_id(id, doc! { "$addToSet": { "roles": role } }).await
    }

    pub async fn remove_role(&self, id: &ObjectId, role: &str) -> Result<bool, AppError> {
        self.update_by_id(id, doc! { "$pull": { "roles": role } }).await
    }

    pub async fn add_claim(&self, id: &ObjectId, claim: &UserClaim) -> Result<bool, AppError> {
        let value = Self::to_bson_value(claim)?;
        self.update_by_id(id, doc! { "$addToSet": { "claims": value } }).await
    }

    pub async fn remove_claim(&self, id: &ObjectId, claim: &UserClaim) -> Result<bool, AppError> {
        let value = Self::to_bson_value(claim)?;
        self.update_by_id(id, doc! { "$pull": { "claims": value } }).await
    }

    pub async fn add_login(&self, id: &ObjectId, login: &UserLogin) -> Result<bool, AppError> {
        let value = Self::to_bson_value(login)?;
        self.update_by_id(id, doc! { "$addToSet": { "logins": value } }).await
    }

    pub async fn remove_login(&self, id: &ObjectId, login: &UserLogin) -> Result<bool, AppError> {
        let value = Self::to_bson_value(login)?;
        self.update_by_id(id, doc! { "$pull": { "logins": value } }).await
    }

    pub async fn add_friend(&self, id: &ObjectId, friend_id: &ObjectId) -> Result<bool, AppError> {
        self.update_by_id(id, doc! { "$addToSet": { "friend_ids": friend_id } }).await
    }

    pub async fn remove_friend(&self, id: &ObjectId, friend_id: &ObjectId) -> Result<bool, AppError> {
        self.update_by_id(id, doc! { "$pull": { "friend_ids": friend_id } }).await
    }

    /// 상품 설명을 추가하거나, 같은 상품에 대한 기존 설명을 교체합니다.
    ///
    /// 교체된 경우 이전 설명을 반환합니다.
    pub async fn upsert_product_description(
        &self,
        id: &ObjectId,
        description: UserProductDescription,
    ) -> Result<Option<UserProductDescription>, AppError> {
        let previous = self.remove_product_description(id, &description.product_id).await?;

        let mut description = description;
        if let Some(ref old) = previous {
            description.created_at = old.created_at;
            description.modified_at = Some(DateTime::now());
        }

        let value = Self::to_bson_value(&description)?;
        self.update_by_id(id, doc! { "$push": { "product_descriptions": value } }).await?;
        Ok(previous)
    }

    /// 상품 설명을 제거하고, 제거된 설명을 반환합니다. 없으면 None.
    pub async fn remove_product_description(
        &self,
        id: &ObjectId,
        product_id: &ObjectId,
    ) -> Result<Option<UserProductDescription>, AppError> {
        let user = self.collection::<User>()
            .find_one(doc! { "_id": id })
            .await
            .map_err(db_error)?;

        let removed = user
            .as_ref()
            .and_then(|u| u.product_description(product_id))
            .cloned();

        if removed.is_some() {
            self.update_by_id(id, doc! { "$pull": { "product_descriptions": { "product_id": product_id } } })
                .await?;
        }

        Ok(removed)
    }

    /// 모든 사용자의 역할 이름을 변경합니다. 변경된 사용자 수를 반환합니다.
    pub async fn rename_role_everywhere(&self, old_name: &str, new_name: &str) -> Result<u64, AppError> {
        let options = UpdateOptions::builder()
            .array_filters(vec![doc! { "role": old_name }])
            .build();

        let result = self.collection::<User>()
            .update_many(
                doc! { "roles": old_name },
                doc! { "$set": { "roles.$[role]": new_name, "modified_at": DateTime::now() } },
            )
            .with_options(options)
            .await
            .map_err(db_error)?;

        self.invalidate_all_cached().await;
        Ok(result.modified_count)
    }

    /// 모든 사용자에게서 역할을 제거합니다. 변경된 사용자 수를 반환합니다.
    pub async fn remove_role_everywhere(&self, role: &str) -> Result<u64, AppError> {
        let result = self.collection::<User>()
            .update_many(
                doc! { "roles": role },
                doc! { "$pull": { "roles": role }, "$set": { "modified_at": DateTime::now() } },
            )
            .await
            .map_err(db_error)?;

        self.invalidate_all_cached().await;
        Ok(result.modified_count)
    }

    /// 사용자 삭제. 다른 사용자의 친구 목록에서도 제거됩니다.
    pub async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let object_id = parse_object_id(id)?;

        let result = self.collection::<User>()
            .delete_one(doc! { "_id": object_id })
            .await
            .map_err(db_error)?;

        if result.deleted_count == 0 {
            return Ok(false);
        }

        self.collection::<User>()
            .update_many(
                doc! { "friend_ids": object_id },
                doc! { "$pull": { "friend_ids": object_id } },
            )
            .await
            .map_err(db_error)?;

        self.invalidate_all_cached().await;
        Ok(true)
    }

    /// 한 상품에 대한 모든 사용자 평점을 모아 집계합니다.
    ///
    /// 평점 평균은 항상 이 집계로 다시 계산되므로, 동시에 들어온 평가나
    /// 사용자 삭제가 있어도 저장된 평가와 어긋나지 않습니다.
    pub async fn rating_summary(&self, product_id: &ObjectId) -> Result<RatingSummary, AppError> {
        let pipeline = vec![
            doc! { "$match": { "product_descriptions.product_id": product_id } },
            doc! { "$unwind": "$product_descriptions" },
            doc! { "$match": { "product_descriptions.product_id": product_id } },
            doc! { "$group": { "_id": Bson::Null, "ratings": { "$push": "$product_descriptions.rating" } } },
        ];

        let cursor = self.collection::<User>()
            .aggregate(pipeline)
            .await
            .map_err(db_error)?;
        let groups = collect(cursor).await?;

        Ok(summary_from_group(groups.first()))
    }

    /// 컬렉션 인덱스 생성
    ///
    /// - `email_unique`: 이메일 유니크
    /// - `username_unique`: 사용자명 유니크
    /// - `roles`: 역할별 사용자 조회
    /// - `product_descriptions.product_id`: 상품별 평점 집계
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build())
            .build();

        let username_index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("username_unique".to_string())
                .build())
            .build();

        let roles_index = IndexModel::builder()
            .keys(doc! { "roles": 1 })
            .options(IndexOptions::builder()
                .name("roles".to_string())
                .build())
            .build();

        let rated_products_index = IndexModel::builder()
            .keys(doc! { "product_descriptions.product_id": 1 })
            .options(IndexOptions::builder()
                .name("rated_products".to_string())
                .build())
            .build();

        self.collection::<User>()
            .create_indexes([email_index, username_index, roles_index, rated_products_index])
            .await
            .map_err(db_error)?;

        Ok(())
    }
}

/// `$group` 결과 문서에서 평점 목록을 꺼내 집계합니다. 평가가 없으면 문서도 없습니다.
fn summary_from_group(group: Option<&Document>) -> RatingSummary {
    let ratings: Vec<u8> = group
        .and_then(|group| group.get_array("ratings").ok())
        .map(|values| {
            values
                .iter()
                .filter_map(|value| match value {
                    Bson::Int32(n) => u8::try_from(*n).ok(),
                    Bson::Int64(n) => u8::try_from(*n).ok(),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default();

    RatingSummary::from_ratings(&ratings)
}
