//! # 카테고리 리포지토리
//!
//! 카테고리는 이름으로 식별되며, 이름 비교는 `name_key`를 통해 대소문자를 무시합니다.

use std::sync::Arc;

use mongodb::bson::{doc, DateTime};
use mongodb::options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument};
use mongodb::IndexModel;
use singleton_macro::repository;

use crate::db::Database;
use crate::domain::entities::products::Category;
use crate::errors::errors::AppError;
use crate::repositories::{collect, db_error, inserted_object_id, is_duplicate_key, parse_object_id};
use crate::utils::string_utils::normalize_key;

#[repository(name = "category", collection = "categories")]
pub struct CategoryRepository {
    db: Arc<Database>,
}

impl CategoryRepository {
    pub fn with_dependencies(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Category>, AppError> {
        let object_id = parse_object_id(id)?;
        self.collection::<Category>()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(db_error)
    }

    /// 이름으로 조회 (대소문자 무시)
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Category>, AppError> {
        self.collection::<Category>()
            .find_one(doc! { "name_key": normalize_key(name) })
            .await
            .map_err(db_error)
    }

    pub async fn find_all(&self) -> Result<Vec<Category>, AppError> {
        let cursor = self.collection::<Category>()
            .find(doc! {})
            .sort(doc! { "name_key": 1 })
            .await
            .map_err(db_error)?;
        collect(cursor).await
    }

    pub async fn insert(&self, mut category: Category) -> Result<Category, AppError> {
        let result = self.collection::<Category>()
            .insert_one(&category)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    AppError::ConflictError(format!("카테고리가 이미 존재합니다: {}", category.name))
                } else {
                    db_error(e)
                }
            })?;

        category.id = Some(inserted_object_id(&result)?);
        Ok(category)
    }

    /// 설명을 변경하고 변경된 카테고리를 반환합니다. 없으면 None.
    pub async fn set_description(&self, name: &str, description: Option<String>) -> Result<Option<Category>, AppError> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.collection::<Category>()
            .find_one_and_update(
                doc! { "name_key": normalize_key(name) },
                doc! { "$set": { "description": description, "modified_at": DateTime::now() } },
            )
            .with_options(options)
            .await
            .map_err(db_error)
    }

    pub async fn delete_by_name(&self, name: &str) -> Result<bool, AppError> {
        let result = self.collection::<Category>()
            .delete_one(doc! { "name_key": normalize_key(name) })
            .await
            .map_err(db_error)?;

        Ok(result.deleted_count > 0)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let name_index = IndexModel::builder()
            .keys(doc! { "name_key": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("name_key_unique".to_string())
                .build())
            .build();

        self.collection::<Category>()
            .create_index(name_index)
            .await
            .map_err(db_error)?;

        Ok(())
    }
}

