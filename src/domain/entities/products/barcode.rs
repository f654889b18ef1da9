use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::dto::validate_barcode;

/// 바코드 정보 (상품 문서에 포함)
///
/// `code`는 13자리 EAN-13 코드이며 상품을 찾는 키로도 쓰입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Barcode {
    #[validate(custom(function = "validate_barcode"))]
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub composition: Option<String>,
    /// 중량 (그램)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture_url: Option<String>,
}

impl Barcode {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            product_name: None,
            brand: None,
            country: None,
            composition: None,
            weight: None,
            picture_url: None,
        }
    }
}
