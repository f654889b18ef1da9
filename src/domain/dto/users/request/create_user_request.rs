//! 회원 가입 요청 DTO
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::dto::validators::{validate_password_strength, validate_username};

/// 새로운 사용자 계정 생성을 위한 요청 DTO
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_passwords_match"))]
pub struct RegisterRequest {
    /// 사용자 이메일 주소
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    /// 사용자명 (3-30자, 영문/숫자/언더스코어만 허용)
    #[validate(length(
        min = 3,
        max = 30,
        message = "사용자명은 3-30자 사이여야 합니다"
    ))]
    #[validate(custom(function = "validate_username"))]
    pub username: String,

    /// 계정 비밀번호 (최소 8자, 대소문자+숫자 포함)
    #[validate(length(
        min = 8,
        message = "비밀번호는 최소 8자 이상이어야 합니다"
    ))]
    #[validate(custom(function = "validate_password_strength"))]
    pub password: String,

    /// 비밀번호 확인 (password와 일치해야 함)
    pub password_confirm: String,
}

/// 비밀번호 일치 여부를 검증
fn validate_passwords_match(req: &RegisterRequest) -> Result<(), ValidationError> {
    if req.password != req.password_confirm {
        return Err(ValidationError::new("passwords_mismatch")
            .with_message("비밀번호가 일치하지 않습니다".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> RegisterRequest {
        RegisterRequest {
            email: "anna@example.com".to_string(),
            username: "anna_k".to_string(),
            password: "Recycle2024".to_string(),
            password_confirm: "Recycle2024".to_string(),
        }
    }

    #[test]
    fn test_valid_registration() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_invalid_registrations() {
        let mut bad_email = request();
        bad_email.email = "not-an-email".to_string();
        assert!(bad_email.validate().is_err());

        let mut short_name = request();
        short_name.username = "an".to_string();
        assert!(short_name.validate().is_err());

        let mut mismatch = request();
        mismatch.password_confirm = "Recycle2025".to_string();
        assert!(mismatch.validate().is_err());

        let mut weak = request();
        weak.password = "recycling".to_string();
        weak.password_confirm = "recycling".to_string();
        assert!(weak.validate().is_err());
    }
}
