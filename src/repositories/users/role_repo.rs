//! 역할 리포지토리
//!
//! 역할 이름은 대소문자를 무시하고 유일합니다. 초기화 시 기본 역할(`user`, `admin`)을
//! 생성합니다.

use std::sync::Arc;

use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::IndexOptions;
use mongodb::IndexModel;
use singleton_macro::repository;

use crate::db::Database;
use crate::domain::entities::users::{Role, ADMIN_ROLE, DEFAULT_ROLE};
use crate::errors::errors::AppError;
use crate::repositories::{collect, db_error, inserted_object_id, is_duplicate_key};
use crate::utils::string_utils::normalize_key;

#[repository(name = "role", collection = "roles")]
pub struct RoleRepository {
    db: Arc<Database>,
}

impl RoleRepository {
    /// 레지스트리를 거치지 않고 직접 구성합니다. 통합 테스트에서 사용합니다.
    pub fn with_dependencies(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn insert(&self, mut role: Role) -> Result<Role, AppError> {
        let result = self.collection::<Role>()
            .insert_one(&role)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    AppError::ConflictError(format!("역할이 이미 존재합니다: {}", role.name))
                } else {
                    db_error(e)
                }
            })?;

        role.id = Some(inserted_object_id(&result)?);
        Ok(role)
    }

    pub async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Role>, AppError> {
        self.collection::<Role>()
            .find_one(doc! { "_id": id })
            .await
            .map_err(db_error)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Role>, AppError> {
        self.collection::<Role>()
            .find_one(doc! { "name_key": normalize_key(name) })
            .await
            .map_err(db_error)
    }

    pub async fn find_all(&self) -> Result<Vec<Role>, AppError> {
        let cursor = self.collection::<Role>()
            .find(doc! {})
            .sort(doc! { "name_key": 1 })
            .await
            .map_err(db_error)?;
        collect(cursor).await
    }

    /// 역할 이름 변경. 역할이 없으면 false.
    pub async fn rename(&self, id: &ObjectId, new_name: &str) -> Result<bool, AppError> {
        let result = self.collection::<Role>()
            .update_one(
                doc! { "_id": id },
                doc! { "$set": { "name": new_name, "name_key": normalize_key(new_name) } },
            )
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    AppError::ConflictError(format!("역할이 이미 존재합니다: {}", new_name))
                } else {
                    db_error(e)
                }
            })?;

        Ok(result.matched_count > 0)
    }

    pub async fn delete(&self, id: &ObjectId) -> Result<bool, AppError> {
        let result = self.collection::<Role>()
            .delete_one(doc! { "_id": id })
            .await
            .map_err(db_error)?;

        Ok(result.deleted_count > 0)
    }

    /// 이름 유니크 인덱스를 만들고 기본 역할(`user`, `admin`)을 넣습니다.
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let name_index = IndexModel::builder()
            .keys(doc! { "name_key": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("name_key_unique".to_string())
                .build())
            .build();

        self.collection::<Role>()
            .create_index(name_index)
            .await
            .map_err(db_error)?;

        for name in [DEFAULT_ROLE, ADMIN_ROLE] {
            if self.find_by_name(name).await?.is_none() {
                self.insert(Role::new(name)).await?;
                log::info!("🔑 Seeded default role: {}", name);
            }
        }

        Ok(())
    }
}

