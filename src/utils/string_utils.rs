//! # 문자열 유틸리티
//!
//! 입력값 정리와 이름/바코드 검증에 쓰이는 공통 함수들입니다.

use serde::Deserialize;
use crate::errors::errors::AppError;

/// 필수 문자열 필드 검증 및 정리
///
/// 빈 문자열이나 공백만 있는 경우 ValidationError를 반환하고,
/// 유효한 문자열인 경우 앞뒤 공백을 제거한 문자열을 반환합니다.
///
/// # 예제
/// ```rust,ignore
/// use crate::utils::string_utils::validate_required_string;
///
/// assert_eq!(validate_required_string("  Milk  ", "name").unwrap(), "Milk");
/// assert!(validate_required_string("   ", "name").is_err());
/// ```
pub fn validate_required_string(value: &str, field_name: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(
            format!("{}은(는) 필수입니다", field_name)
        ));
    }
    Ok(trimmed.to_string())
}

/// 선택적 문자열 필드 정리
///
/// None이거나 공백뿐인 값은 None으로, 나머지는 trim된 값으로 반환합니다.
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 대소문자 구분 없는 유일성 비교에 쓰는 키
///
/// 상품/카테고리/역할 이름의 `name_key` 필드에 저장되며,
/// 앞뒤 공백을 제거하고 소문자로 변환합니다.
///
/// ```rust,ignore
/// assert_eq!(normalize_key("  Green Tea "), "green tea");
/// ```
pub fn normalize_key(value: &str) -> String {
    value.trim().to_lowercase()
}

/// 바코드가 정확히 13자리 숫자인지 확인합니다 (EAN-13 형식).
pub fn is_barcode_code(code: &str) -> bool {
    code.len() == 13 && code.bytes().all(|b| b.is_ascii_digit())
}

/// 바코드 형식을 검증하고 정리된 코드를 반환합니다.
pub fn validate_barcode_code(code: &str) -> Result<String, AppError> {
    let trimmed = code.trim();
    if !is_barcode_code(trimmed) {
        return Err(AppError::ValidationError(
            "Barcode must contain exactly 13 digits".to_string()
        ));
    }
    Ok(trimmed.to_string())
}

/// 선택적 문자열 필드를 위한 serde deserializer
///
/// `#[serde(default, deserialize_with = "deserialize_optional_string")]`와 함께 사용하며,
/// 빈 문자열이나 공백뿐인 값은 None이 됩니다.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}
