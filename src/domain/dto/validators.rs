//! DTO 검증에 쓰이는 커스텀 validator 함수들
//!
//! `#[validate(custom(function = "..."))]` 속성에서 사용됩니다.

use validator::ValidationError;

use crate::utils::string_utils::is_barcode_code;

/// 공백만 있는 문자열 거부
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank")
            .with_message("값이 비어 있을 수 없습니다".into()));
    }
    Ok(())
}

/// 13자리 숫자 바코드
pub fn validate_barcode(code: &str) -> Result<(), ValidationError> {
    if !is_barcode_code(code) {
        return Err(ValidationError::new("invalid_barcode")
            .with_message("바코드는 13자리 숫자여야 합니다".into()));
    }
    Ok(())
}

/// 사용자명 형식 검증 (영문, 숫자, 언더스코어만 허용)
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if !username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ValidationError::new("invalid_username")
            .with_message("사용자명은 알파벳, 숫자, 언더스코어만 사용 가능합니다".into()));
    }
    Ok(())
}

/// 비밀번호 보안 강도 검증 (대문자, 소문자, 숫자 필수 포함)
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let has_uppercase = password.chars().any(|c| c.is_uppercase());
    let has_lowercase = password.chars().any(|c| c.is_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if !(has_uppercase && has_lowercase && has_digit) {
        return Err(ValidationError::new("weak_password")
            .with_message("비밀번호는 대문자, 소문자, 숫자를 포함해야 합니다".into()));
    }

    Ok(())
}

/// ISO 4217 형식의 통화 코드 (대문자 3글자)
pub fn validate_currency(currency: &str) -> Result<(), ValidationError> {
    if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(ValidationError::new("invalid_currency")
            .with_message("통화 코드는 대문자 3글자여야 합니다".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_rules() {
        assert!(validate_username("eco_user_1").is_ok());
        assert!(validate_username("eco-user").is_err());
        assert!(validate_username("эко").is_err());
    }

    #[test]
    fn test_password_strength() {
        assert!(validate_password_strength("Recycle2024").is_ok());
        assert!(validate_password_strength("recycle2024").is_err());
        assert!(validate_password_strength("RECYCLE2024").is_err());
        assert!(validate_password_strength("RecycleNow").is_err());
    }

    #[test]
    fn test_currency() {
        assert!(validate_currency("USD").is_ok());
        assert!(validate_currency("usd").is_err());
        assert!(validate_currency("US").is_err());
    }

    #[test]
    fn test_blank_and_barcode() {
        assert!(validate_not_blank(" x ").is_ok());
        assert!(validate_not_blank(" \t").is_err());
        assert!(validate_barcode("0000000000000").is_ok());
        assert!(validate_barcode("000000000000").is_err());
    }
}
