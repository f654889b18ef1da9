//! Product Entity
//!
//! 카탈로그 상품과 사용자 평점 집계를 표현합니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::domain::entities::products::barcode::Barcode;
use crate::search::Searchable;
use crate::utils::string_utils::normalize_key;

/// 상품 엔티티
///
/// 평점 집계(`avg_rating`, `rate_count`)는 사용자 상품 설명이 바뀔 때마다
/// `users` 컬렉션의 평가 전체에서 다시 계산되어 [`RatingSummary`]로 기록됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    /// 대소문자 구분 없는 유일성 키 (unique 인덱스)
    pub name_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_rating: Option<f64>,
    pub rate_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<Barcode>,
    pub created_at: DateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime>,
}

impl Product {
    pub fn new(name: &str) -> Self {
        let name = name.trim().to_string();
        Self {
            id: None,
            name_key: normalize_key(&name),
            name,
            description: None,
            price: 0.0,
            avg_rating: None,
            rate_count: 0,
            category_id: None,
            barcode: None,
            created_at: DateTime::now(),
            modified_at: None,
        }
    }

    /// 바코드 정보로 상품을 만듭니다. 이름은 바코드의 상품명, 없으면 코드입니다.
    pub fn from_barcode(barcode: Barcode) -> Self {
        let name = barcode
            .product_name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| barcode.code.clone());

        let mut product = Self::new(&name);
        product.barcode = Some(barcode);
        product
    }

    pub fn id_hex(&self) -> String {
        self.id.map(|id| id.to_hex()).unwrap_or_default()
    }

    /// 이름과 `name_key`를 함께 바꿉니다.
    pub fn rename(&mut self, name: &str) {
        self.name = name.trim().to_string();
        self.name_key = normalize_key(&self.name);
    }

    pub fn touch(&mut self) {
        self.modified_at = Some(DateTime::now());
    }

    pub fn apply_summary(&mut self, summary: RatingSummary) {
        self.avg_rating = summary.average;
        self.rate_count = summary.count;
    }
}

/// 한 상품에 대한 사용자 평점 집계. 평가가 없으면 평균은 None입니다.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RatingSummary {
    pub average: Option<f64>,
    pub count: u32,
}

impl RatingSummary {
    pub fn from_ratings(ratings: &[u8]) -> Self {
        if ratings.is_empty() {
            return Self::default();
        }
        let total: u32 = ratings.iter().map(|r| *r as u32).sum();
        Self {
            average: Some(total as f64 / ratings.len() as f64),
            count: ratings.len() as u32,
        }
    }
}

impl Searchable for Product {
    const TEXT_FIELDS: &'static [&'static str] = &["name", "description", "brand"];
    const KEYWORD_FIELDS: &'static [&'static str] = &["barcode", "category_id"];

    fn document_id(&self) -> Option<String> {
        self.id.map(|id| id.to_hex())
    }

    fn field_values(&self) -> Vec<(&'static str, String)> {
        let mut values = vec![("name", self.name.clone())];

        if let Some(description) = &self.description {
            values.push(("description", description.clone()));
        }
        if let Some(barcode) = &self.barcode {
            values.push(("barcode", barcode.code.clone()));
            if let Some(brand) = &barcode.brand {
                values.push(("brand", brand.clone()));
            }
        }
        if let Some(category_id) = &self.category_id {
            values.push(("category_id", category_id.to_hex()));
        }

        values
    }
}
