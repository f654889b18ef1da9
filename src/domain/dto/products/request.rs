use serde::Deserialize;
use validator::Validate;

use crate::domain::dto::validators::validate_not_blank;
use crate::domain::entities::products::Barcode;
use crate::utils::string_utils::deserialize_optional_string;

/// 이름으로 상품 추가 (선택적 상세 정보 포함)
#[derive(Debug, Deserialize, Validate)]
pub struct AddProductRequest {
    #[validate(length(min = 1, max = 200, message = "상품 이름은 1-200자 사이여야 합니다"))]
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub description: Option<String>,

    #[validate(range(min = 0.0, message = "가격은 0 이상이어야 합니다"))]
    pub price: Option<f64>,
}

/// 상품 변경 요청. 지정된 필드만 바뀝니다.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateProductRequest {
    #[validate(custom(function = "validate_not_blank"))]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub description: Option<String>,

    #[validate(range(min = 0.0, message = "가격은 0 이상이어야 합니다"))]
    pub price: Option<f64>,

    #[validate(nested)]
    pub barcode: Option<Barcode>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddCategoryRequest {
    #[validate(length(min = 1, max = 100, message = "카테고리 이름은 1-100자 사이여야 합니다"))]
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CategoryDescriptionRequest {
    #[validate(length(max = 2000, message = "설명은 2000자 이하여야 합니다"))]
    pub description: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct DeleteCategoriesRequest {
    #[validate(length(min = 1, message = "삭제할 카테고리를 하나 이상 지정해주세요"))]
    pub names: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_product_name_is_rejected() {
        let request: AddProductRequest = serde_json::from_str(r#"{"name": "   "}"#).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_negative_price_is_rejected() {
        let request: AddProductRequest = serde_json::from_str(r#"{"name": "Milk", "price": -1.0}"#).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_update_validates_nested_barcode() {
        let request: UpdateProductRequest =
            serde_json::from_str(r#"{"barcode": {"code": "123"}}"#).unwrap();
        assert!(request.validate().is_err());

        let request: UpdateProductRequest =
            serde_json::from_str(r#"{"barcode": {"code": "4601234567890", "brand": "Savushkin"}}"#).unwrap();
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_empty_update_is_valid() {
        assert!(UpdateProductRequest::default().validate().is_ok());
    }
}
