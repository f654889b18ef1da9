//! 카테고리 서비스
//!
//! 카테고리 이름은 대소문자를 무시하고 유일합니다. 카테고리를 지우면
//! 그 카테고리에 속한 상품들은 카테고리 없는 상태가 됩니다.

use std::sync::Arc;

use validator::Validate;
use singleton_macro::service;

use crate::domain::dto::products::request::AddCategoryRequest;
use crate::domain::dto::products::response::CategoryResponse;
use crate::domain::entities::products::Category;
use crate::errors::errors::AppError;
use crate::repositories::products::{CategoryRepository, ProductRepository};
use crate::utils::string_utils::clean_optional_string;

#[service(name = "category")]
pub struct CategoryService {
    category_repo: Arc<CategoryRepository>,
    product_repo: Arc<ProductRepository>,
}

impl CategoryService {
    pub fn with_dependencies(category_repo: Arc<CategoryRepository>, product_repo: Arc<ProductRepository>) -> Self {
        Self { category_repo, product_repo }
    }

    /// 카테고리 추가. 같은 이름이 있으면 None.
    pub async fn add(&self, request: AddCategoryRequest) -> Result<Option<CategoryResponse>, AppError> {
        request.validate()?;

        if self.category_repo.find_by_name(&request.name).await?.is_some() {
            return Ok(None);
        }

        let mut category = Category::new(&request.name);
        category.description = request.description;

        let created = self.category_repo.insert(category).await?;
        log::info!("🗂️ Category added: {}", created.name);
        Ok(Some(CategoryResponse::from(created)))
    }

    pub async fn get(&self, name: &str) -> Result<Option<CategoryResponse>, AppError> {
        Ok(self.category_repo.find_by_name(name).await?.map(CategoryResponse::from))
    }

    pub async fn get_all(&self) -> Result<Vec<CategoryResponse>, AppError> {
        let categories = self.category_repo.find_all().await?;
        Ok(categories.into_iter().map(CategoryResponse::from).collect())
    }

    /// 설명 변경. 빈 문자열은 설명 삭제로 처리합니다. 카테고리가 없으면 None.
    pub async fn set_description(&self, name: &str, description: &str) -> Result<Option<CategoryResponse>, AppError> {
        let description = clean_optional_string(Some(description.to_string()));
        Ok(self.category_repo
            .set_description(name, description)
            .await?
            .map(CategoryResponse::from))
    }

    /// 카테고리 삭제. 속한 상품들의 카테고리를 해제합니다. 없으면 false.
    pub async fn delete(&self, name: &str) -> Result<bool, AppError> {
        let Some(category) = self.category_repo.find_by_name(name).await? else {
            return Ok(false);
        };

        if !self.category_repo.delete_by_name(name).await? {
            return Ok(false);
        }

        if let Some(category_id) = category.id {
            let detached = self.product_repo.detach_category(&category_id).await?;
            log::info!("🗂️ Category {} deleted, {} products detached", category.name, detached);
        }

        Ok(true)
    }

    /// 여러 카테고리 삭제. 하나라도 삭제되면 true.
    pub async fn delete_range(&self, names: &[String]) -> Result<bool, AppError> {
        let mut any_deleted = false;
        for name in names {
            any_deleted |= self.delete(name).await?;
        }
        Ok(any_deleted)
    }
}
