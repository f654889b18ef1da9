use serde::{Deserialize, Serialize};

use crate::domain::dto::{format_datetime, format_optional_datetime, id_hex};
use crate::domain::entities::products::{Barcode, Category, Product};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub avg_rating: Option<f64>,
    pub rate_count: u32,
    pub category_id: Option<String>,
    pub barcode: Option<Barcode>,
    pub created_at: String,
    pub modified_at: Option<String>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: id_hex(product.id),
            name: product.name,
            description: product.description,
            price: product.price,
            avg_rating: product.avg_rating,
            rate_count: product.rate_count,
            category_id: product.category_id.map(|id| id.to_hex()),
            barcode: product.barcode,
            created_at: format_datetime(product.created_at),
            modified_at: format_optional_datetime(product.modified_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
    pub modified_at: Option<String>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: id_hex(category.id),
            name: category.name,
            description: category.description,
            created_at: format_datetime(category.created_at),
            modified_at: format_optional_datetime(category.modified_at),
        }
    }
}

/// 바코드로 상품을 추가한 결과
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarcodeProductResponse {
    pub id: String,
    /// 이번 요청으로 새로 만들어졌는지 여부
    pub created: bool,
}
