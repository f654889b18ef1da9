//! # 상품 검색 서비스
//!
//! 상품 검색 인덱스에 대한 질의와 관리 작업(최적화, 초기화, 재구축)을 담당합니다.
//!
//! ## 기본값
//!
//! | 항목 | 값 |
//! |------|----|
//! | 검색 필드 | `name`, `description`, `brand` |
//! | 가중치 | `name` = 2.0, `brand` = 1.5 |
//! | 결과 수 | `SearchConfig::clamp_limit` |

use std::collections::HashMap;
use std::sync::Arc;

use validator::Validate;
use singleton_macro::service;

use crate::config::SearchConfig;
use crate::domain::dto::products::response::ProductResponse;
use crate::domain::dto::search::SearchQuery;
use crate::errors::errors::AppError;
use crate::repositories::products::ProductRepository;
use crate::search::ProductIndex;

pub const DEFAULT_FIELDS: [&str; 3] = ["name", "description", "brand"];

pub fn default_boosts() -> HashMap<String, f32> {
    HashMap::from([("name".to_string(), 2.0), ("brand".to_string(), 1.5)])
}

/// 기본값을 적용하여 인덱스를 검색합니다.
pub fn search_index(index: &ProductIndex, query: &SearchQuery) -> Result<Vec<ProductResponse>, AppError> {
    query.validate()?;

    let fields = query
        .field_list()
        .filter(|fields| !fields.is_empty())
        .unwrap_or_else(|| DEFAULT_FIELDS.iter().map(|f| f.to_string()).collect());
    let limit = SearchConfig::clamp_limit(query.limit);

    let products = index.get_all_matching(&query.query, &fields, &default_boosts(), limit)?;
    Ok(products.into_iter().map(ProductResponse::from).collect())
}

#[service(name = "search")]
pub struct SearchService {
    index: Arc<ProductIndex>,
    product_repo: Arc<ProductRepository>,
}

impl SearchService {
    pub fn with_dependencies(index: Arc<ProductIndex>, product_repo: Arc<ProductRepository>) -> Self {
        Self { index, product_repo }
    }

    pub fn search_products(&self, query: &SearchQuery) -> Result<Vec<ProductResponse>, AppError> {
        let start = std::time::Instant::now();
        let results = search_index(&self.index, query)?;
        log::debug!("🔎 Search '{}' returned {} results in {:?}", query.query, results.len(), start.elapsed());
        Ok(results)
    }

    /// 인덱스에 저장된 상품 문서를 id로 조회합니다.
    pub fn get_indexed_product(&self, id: &str) -> Result<Option<ProductResponse>, AppError> {
        Ok(self.index.get_by_id(id)?.map(ProductResponse::from))
    }

    pub fn optimize(&self) -> Result<(), AppError> {
        self.index.optimize()?;
        log::info!("🔎 Search index optimized");
        Ok(())
    }

    pub fn clear(&self) -> Result<(), AppError> {
        self.index.clear()?;
        log::info!("🔎 Search index cleared");
        Ok(())
    }

    /// 인덱스를 비우고 저장된 모든 상품을 다시 넣습니다. 색인된 상품 수를 반환합니다.
    pub async fn rebuild(&self) -> Result<usize, AppError> {
        let products = self.product_repo.find_all().await?;

        self.index.clear()?;
        for product in &products {
            self.index.insert(product)?;
        }

        log::info!("🔎 Search index rebuilt with {} products", products.len());
        Ok(products.len())
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::products::{Barcode, Product};
    use crate::search::SearchRepository;
    use mongodb::bson::oid::ObjectId;

    fn product(name: &str, description: Option<&str>, brand: Option<&str>) -> Product {
        let mut product = Product::new(name);
        product.id = Some(ObjectId::new());
        product.description = description.map(str::to_string);
        if let Some(brand) = brand {
            let mut barcode = Barcode::new("4810000000011");
            barcode.brand = Some(brand.to_string());
            product.barcode = Some(barcode);
        }
        product
    }

    fn query(text: &str, fields: Option<&str>) -> SearchQuery {
        SearchQuery {
            query: text.to_string(),
            fields: fields.map(str::to_string),
            limit: None,
        }
    }

    #[test]
    fn test_name_match_outranks_description_match() {
        let index = SearchRepository::<Product>::in_memory().unwrap();
        index.insert(&product("Yogurt drink", Some("strawberry"), None)).unwrap();
        index.insert(&product("Strawberry jam", None, None)).unwrap();

        let results = search_index(&index, &query("strawberry", None)).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name, "Strawberry jam");
    }

    #[test]
    fn test_prefix_matches_and_brand_field() {
        let index = SearchRepository::<Product>::in_memory().unwrap();
        index.insert(&product("Kefir", None, Some("Savushkin"))).unwrap();

        let results = search_index(&index, &query("savu", None)).unwrap();
        assert_eq!(results.len(), 1);

        let results = search_index(&index, &query("savu", Some("name"))).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_blank_query_and_unknown_field_are_rejected() {
        let index = SearchRepository::<Product>::in_memory().unwrap();

        assert!(matches!(search_index(&index, &query(" ** ", None)), Err(AppError::ValidationError(_))));
        assert!(matches!(
            search_index(&index, &query("milk", Some("colour"))),
            Err(AppError::ValidationError(_))
        ));
    }
}
