//! # 상품 서비스
//!
//! 카탈로그 상품의 추가, 조회, 변경, 삭제와 카테고리 지정을 담당합니다.
//! 바코드 조회도 이 서비스가 처리합니다.
//!
//! 저장소 쓰기와 검색 인덱스 반영은 [`ProductRepository`]가 함께 수행하므로,
//! 이 서비스는 비즈니스 규칙(이름 중복, 존재 여부)만 다룹니다.

use std::sync::Arc;

use validator::Validate;
use singleton_macro::service;

use crate::domain::dto::products::request::{AddProductRequest, UpdateProductRequest};
use crate::domain::dto::products::response::{BarcodeProductResponse, ProductResponse};
use crate::domain::entities::products::{Barcode, Product};
use crate::errors::errors::AppError;
use crate::repositories::parse_object_id;
use crate::repositories::products::{CategoryRepository, ProductRepository};
use crate::utils::string_utils::validate_barcode_code;

#[service(name = "product")]
pub struct ProductService {
    product_repo: Arc<ProductRepository>,
    category_repo: Arc<CategoryRepository>,
}

/// 변경 요청을 상품에 적용합니다. 지정되지 않은 필드는 그대로 둡니다.
///
/// 적용 전에 요청 전체를 검증합니다.
pub fn apply_update(product: &mut Product, request: UpdateProductRequest) -> Result<(), AppError> {
    request.validate()?;

    if let Some(name) = request.name {
        product.rename(&name);
    }
    if request.description.is_some() {
        product.description = request.description;
    }
    if let Some(price) = request.price {
        product.price = price;
    }
    if let Some(barcode) = request.barcode {
        product.barcode = Some(barcode);
    }

    product.touch();
    Ok(())
}

impl ProductService {
    pub fn with_dependencies(product_repo: Arc<ProductRepository>, category_repo: Arc<CategoryRepository>) -> Self {
        Self { product_repo, category_repo }
    }

    /// 이름으로 상품 추가
    ///
    /// 같은 이름(대소문자 무시)의 상품이 이미 있으면 None을 반환합니다.
    pub async fn add_by_name(&self, request: AddProductRequest) -> Result<Option<ProductResponse>, AppError> {
        request.validate()?;

        if self.product_repo.find_by_name(&request.name).await?.is_some() {
            return Ok(None);
        }

        let mut product = Product::new(&request.name);
        product.description = request.description;
        product.price = request.price.unwrap_or(0.0);

        let created = self.product_repo.insert(product).await?;
        log::info!("📦 Product added: {}", created.name);
        Ok(Some(ProductResponse::from(created)))
    }

    /// 바코드로 상품 추가
    ///
    /// 이미 알려진 바코드면 기존 상품의 id를, 아니면 바코드 상품명으로 새 상품을 만들고 그 id를 반환합니다.
    pub async fn add_by_barcode(&self, barcode: Barcode) -> Result<BarcodeProductResponse, AppError> {
        barcode.validate()?;

        if let Some(existing) = self.product_repo.find_by_barcode(&barcode.code).await? {
            return Ok(BarcodeProductResponse { id: existing.id_hex(), created: false });
        }

        let created = self.product_repo.insert(Product::from_barcode(barcode)).await?;
        log::info!("📦 Product added from barcode: {}", created.name);
        Ok(BarcodeProductResponse { id: created.id_hex(), created: true })
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<ProductResponse>, AppError> {
        Ok(self.product_repo.find_by_id(id).await?.map(ProductResponse::from))
    }

    /// 바코드로 상품 조회. 코드는 13자리 숫자여야 합니다.
    pub async fn get_by_barcode(&self, code: &str) -> Result<Option<ProductResponse>, AppError> {
        let code = validate_barcode_code(code)?;
        Ok(self.product_repo.find_by_barcode(&code).await?.map(ProductResponse::from))
    }

    pub async fn get_all(&self) -> Result<Vec<ProductResponse>, AppError> {
        let products = self.product_repo.find_all().await?;
        Ok(products.into_iter().map(ProductResponse::from).collect())
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Option<ProductResponse>, AppError> {
        Ok(self.product_repo.find_by_name(name).await?.map(ProductResponse::from))
    }

    pub async fn get_by_category(&self, category_id: &str) -> Result<Vec<ProductResponse>, AppError> {
        let category_id = parse_object_id(category_id)?;
        let products = self.product_repo.find_by_category(&category_id).await?;
        Ok(products.into_iter().map(ProductResponse::from).collect())
    }

    /// 상품 변경. 상품이 없으면 None.
    pub async fn update(&self, id: &str, request: UpdateProductRequest) -> Result<Option<ProductResponse>, AppError> {
        let Some(mut product) = self.product_repo.find_by_id(id).await? else {
            return Ok(None);
        };

        if let Some(ref name) = request.name {
            if let Some(other) = self.product_repo.find_by_name(name).await? {
                if other.id != product.id {
                    return Err(AppError::ConflictError(format!("상품이 이미 존재합니다: {}", name.trim())));
                }
            }
        }

        apply_update(&mut product, request)?;

        let updated = self.product_repo.update_details(&product).await?;
        Ok(updated.map(ProductResponse::from))
    }

    /// 상품 삭제. 없으면 false.
    pub async fn delete(&self, id: &str) -> Result<bool, AppError> {
        self.product_repo.delete(id).await
    }

    /// 상품을 카테고리에 넣습니다. 상품이나 카테고리가 없으면 false.
    pub async fn add_to_category(&self, product_id: &str, category_id: &str) -> Result<bool, AppError> {
        let product_object_id = parse_object_id(product_id)?;
        let Some(category) = self.category_repo.find_by_id(category_id).await? else {
            return Ok(false);
        };
        let Some(category_object_id) = category.id else {
            return Ok(false);
        };

        let updated = self.product_repo
            .set_category(&product_object_id, &category_object_id)
            .await?;
        Ok(updated.is_some())
    }
}
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_update_changes_only_given_fields() {
        let mut product = Product::new("Milk");
        product.description = Some("Fresh".to_string());
        product.price = 1.5;

        let request = UpdateProductRequest {
            name: Some("  Kefir ".to_string()),
            price: Some(2.0),
            ..Default::default()
        };
        apply_update(&mut product, request).unwrap();

        assert_eq!(product.name, "Kefir");
        assert_eq!(product.name_key, "kefir");
        assert_eq!(product.description.as_deref(), Some("Fresh"));
        assert_eq!(product.price, 2.0);
        assert!(product.modified_at.is_some());
    }

    #[test]
    fn test_apply_update_rejects_invalid_barcode() {
        let mut product = Product::new("Milk");
        let request = UpdateProductRequest {
            barcode: Some(Barcode::new("12345")),
            ..Default::default()
        };

        assert!(matches!(apply_update(&mut product, request), Err(AppError::ValidationError(_))));
        assert!(product.barcode.is_none());
        assert!(product.modified_at.is_none());
    }

    #[test]
    fn test_apply_update_sets_barcode() {
        let mut product = Product::new("Milk");
        let request = UpdateProductRequest {
            barcode: Some(Barcode::new("4810000000011")),
            ..Default::default()
        };

        apply_update(&mut product, request).unwrap();
        assert_eq!(product.barcode.map(|b| b.code), Some("4810000000011".to_string()));
    }
}
