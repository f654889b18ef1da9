//! # 상품 리포지토리
//!
//! MongoDB `products` 컬렉션을 주 저장소로 사용하며, 두 가지 부가 저장소를 함께 관리합니다.
//!
//! - **Redis**: `product_repository:{id}` 키로 단건 조회 캐시 (`CacheConfig::ttl_seconds()`)
//! - **검색 인덱스**: 모든 쓰기가 성공한 뒤 같은 상품을 인덱스에 반영
//!
//! 인덱스 쓰기 실패는 요청을 실패시키지 않습니다. 로그를 남기고, 관리자의
//! 인덱스 재구축으로 복구합니다.

use std::sync::Arc;

use mongodb::bson::{doc, oid::ObjectId, DateTime};
use mongodb::options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument};
use mongodb::IndexModel;
use singleton_macro::repository;

use crate::caching::redis::RedisClient;
use crate::config::CacheConfig;
use crate::core::registry::Repository;
use crate::db::Database;
use crate::domain::entities::products::{Product, RatingSummary};
use crate::errors::errors::AppError;
use crate::repositories::{collect, db_error, inserted_object_id, is_duplicate_key, parse_object_id};
use crate::search::ProductIndex;
use crate::utils::string_utils::normalize_key;

#[repository(name = "product", collection = "products")]
pub struct ProductRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
    index: Arc<ProductIndex>,
}

impl ProductRepository {
    /// 레지스트리를 거치지 않고 직접 구성합니다. 통합 테스트에서 사용합니다.
    pub fn with_dependencies(db: Arc<Database>, redis: Arc<RedisClient>, index: Arc<ProductIndex>) -> Self {
        Self { db, redis, index }
    }

    /// 인덱스 쓰기 결과를 기록합니다. 실패해도 호출자에게 전파하지 않습니다.
    fn log_index_result(operation: &str, product_id: &str, result: Result<(), AppError>) {
        if let Err(e) = result {
            log::error!("🔎 Search index {} failed for product {}: {}", operation, product_id, e);
        }
    }

    /// ID로 상품 조회 (캐시 우선)
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Product>, AppError> {
        let object_id = parse_object_id(id)?;
        let cache_key = self.cache_key(id);

        if let Ok(Some(cached)) = self.redis.get::<Product>(&cache_key).await {
            return Ok(Some(cached));
        }

        let product = self.collection::<Product>()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(db_error)?;

        if let Some(ref product) = product {
            let _ = self.redis
                .set_with_expiry(&cache_key, product, CacheConfig::ttl_seconds())
                .await;
        }

        Ok(product)
    }

    /// 이름으로 조회 (대소문자 무시)
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Product>, AppError> {
        self.collection::<Product>()
            .find_one(doc! { "name_key": normalize_key(name) })
            .await
            .map_err(db_error)
    }

    pub async fn find_by_barcode(&self, code: &str) -> Result<Option<Product>, AppError> {
        self.collection::<Product>()
            .find_one(doc! { "barcode.code": code })
            .await
            .map_err(db_error)
    }

    pub async fn find_all(&self) -> Result<Vec<Product>, AppError> {
        let cursor = self.collection::<Product>()
            .find(doc! {})
            .sort(doc! { "name_key": 1 })
            .await
            .map_err(db_error)?;
        collect(cursor).await
    }

    pub async fn find_by_category(&self, category_id: &ObjectId) -> Result<Vec<Product>, AppError> {
        let cursor = self.collection::<Product>()
            .find(doc! { "category_id": category_id })
            .sort(doc! { "name_key": 1 })
            .await
            .map_err(db_error)?;
        collect(cursor).await
    }

    /// 새 상품을 저장하고 인덱스에 추가합니다.
    ///
    /// 같은 이름(대소문자 무시)이나 바코드가 이미 있으면 ConflictError입니다.
    pub async fn insert(&self, mut product: Product) -> Result<Product, AppError> {
        let result = self.collection::<Product>()
            .insert_one(&product)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    AppError::ConflictError(format!("상품이 이미 존재합니다: {}", product.name))
                } else {
                    db_error(e)
                }
            })?;

        product.id = Some(inserted_object_id(&result)?);

        Self::log_index_result("insert", &product.id_hex(), self.index.insert(&product));
        Ok(product)
    }

    /// 사용자가 편집할 수 있는 필드만 `$set`으로 갱신하고 변경된 상품을 반환합니다.
    ///
    /// 평점 집계와 카테고리는 각자의 연산이 관리하므로 건드리지 않습니다. 없으면 None.
    pub async fn update_details(&self, product: &Product) -> Result<Option<Product>, AppError> {
        let object_id = product
            .id
            .ok_or_else(|| AppError::ValidationError("저장되지 않은 상품은 변경할 수 없습니다".to_string()))?;

        let mut fields = doc! {
            "name": product.name.as_str(),
            "name_key": product.name_key.as_str(),
            "price": product.price,
            "modified_at": DateTime::now(),
        };
        if let Some(description) = &product.description {
            fields.insert("description", description.as_str());
        }
        if let Some(barcode) = &product.barcode {
            let value = mongodb::bson::to_bson(barcode)
                .map_err(|e| AppError::InternalError(format!("BSON 직렬화 실패: {}", e)))?;
            fields.insert("barcode", value);
        }

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self.collection::<Product>()
            .find_one_and_update(doc! { "_id": object_id }, doc! { "$set": fields })
            .with_options(options)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    AppError::ConflictError(format!("상품이 이미 존재합니다: {}", product.name))
                } else {
                    db_error(e)
                }
            })?;

        self.after_update(&object_id, updated.as_ref()).await;
        Ok(updated)
    }

    /// 평점 집계를 기록하고 변경된 상품을 반환합니다. 상품이 없으면 None.
    pub async fn set_rating_summary(&self, product_id: &ObjectId, summary: RatingSummary) -> Result<Option<Product>, AppError> {
        let update = match summary.average {
            Some(average) => doc! {
                "$set": { "avg_rating": average, "rate_count": summary.count as i64, "modified_at": DateTime::now() },
            },
            None => doc! {
                "$set": { "rate_count": 0, "modified_at": DateTime::now() },
                "$unset": { "avg_rating": "" },
            },
        };

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self.collection::<Product>()
            .find_one_and_update(doc! { "_id": product_id }, update)
            .with_options(options)
            .await
            .map_err(db_error)?;

        self.after_update(product_id, updated.as_ref()).await;
        Ok(updated)
    }

    /// 캐시를 비우고 변경된 문서를 인덱스에 반영합니다.
    async fn after_update(&self, product_id: &ObjectId, updated: Option<&Product>) {
        if let Some(product) = updated {
            let id = product_id.to_hex();
            let _ = self.invalidate_cache(&id).await;
            Self::log_index_result("update", &id, self.index.update(product));
        }
    }

    pub async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let object_id = parse_object_id(id)?;

        let result = self.collection::<Product>()
            .delete_one(doc! { "_id": object_id })
            .await
            .map_err(db_error)?;

        if result.deleted_count == 0 {
            return Ok(false);
        }

        let _ = self.invalidate_cache(id).await;
        Self::log_index_result("delete", id, self.index.delete_by_id(id));
        Ok(true)
    }

    /// 상품의 카테고리를 지정하고 변경된 상품을 반환합니다.
    pub async fn set_category(&self, product_id: &ObjectId, category_id: &ObjectId) -> Result<Option<Product>, AppError> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self.collection::<Product>()
            .find_one_and_update(
                doc! { "_id": product_id },
                doc! { "$set": { "category_id": category_id, "modified_at": DateTime::now() } },
            )
            .with_options(options)
            .await
            .map_err(db_error)?;

        self.after_update(product_id, updated.as_ref()).await;
        Ok(updated)
    }

    /// 카테고리가 삭제될 때 해당 카테고리의 모든 상품에서 카테고리를 해제합니다.
    ///
    /// 해제된 상품 수를 반환합니다.
    pub async fn detach_category(&self, category_id: &ObjectId) -> Result<u64, AppError> {
        let affected = self.find_by_category(category_id).await?;
        if affected.is_empty() {
            return Ok(0);
        }

        let result = self.collection::<Product>()
            .update_many(
                doc! { "category_id": category_id },
                doc! { "$unset": { "category_id": "" }, "$set": { "modified_at": DateTime::now() } },
            )
            .await
            .map_err(db_error)?;

        for mut product in affected {
            product.category_id = None;
            let id = product.id_hex();
            let _ = self.invalidate_cache(&id).await;
            Self::log_index_result("update", &id, self.index.update(&product));
        }

        Ok(result.modified_count)
    }

    pub async fn count(&self) -> Result<u64, AppError> {
        self.collection::<Product>()
            .count_documents(doc! {})
            .await
            .map_err(db_error)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let name_index = IndexModel::builder()
            .keys(doc! { "name_key": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("name_key_unique".to_string())
                .build())
            .build();

        let barcode_index = IndexModel::builder()
            .keys(doc! { "barcode.code": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .sparse(true)
                .name("barcode_code_unique".to_string())
                .build())
            .build();

        let category_index = IndexModel::builder()
            .keys(doc! { "category_id": 1 })
            .options(IndexOptions::builder()
                .name("category_id".to_string())
                .build())
            .build();

        self.collection::<Product>()
            .create_indexes([name_index, barcode_index, category_index])
            .await
            .map_err(db_error)?;

        Ok(())
    }
}

