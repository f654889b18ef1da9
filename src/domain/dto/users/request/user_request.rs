//! 사용자 프로필 및 부가 정보 변경 요청 DTO
use serde::Deserialize;
use validator::Validate;

use crate::config::AuthProvider;
use crate::domain::dto::validators::{validate_password_strength, validate_username};
use crate::utils::string_utils::deserialize_optional_string;

/// 프로필 변경 요청
///
/// 이메일, 사용자명, 비밀번호는 각각의 전용 요청으로만 변경됩니다.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 20, message = "전화번호는 20자 이하여야 합니다"))]
    pub phone_number: Option<String>,

    pub email_confirmed: Option<bool>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateEmailRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUsernameRequest {
    #[validate(length(min = 3, max = 30, message = "사용자명은 3-30자 사이여야 합니다"))]
    #[validate(custom(function = "validate_username"))]
    pub username: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1, message = "현재 비밀번호를 입력해주세요"))]
    pub old_password: String,

    #[validate(length(min = 8, message = "비밀번호는 최소 8자 이상이어야 합니다"))]
    #[validate(custom(function = "validate_password_strength"))]
    pub new_password: String,
}

/// 상품 평점 및 설명 등록 요청
#[derive(Debug, Deserialize, Validate)]
pub struct ProductDescriptionRequest {
    #[validate(range(min = 1, max = 5, message = "평점은 1-5 사이여야 합니다"))]
    pub rating: u8,

    #[serde(default)]
    #[validate(length(max = 2000, message = "설명은 2000자 이하여야 합니다"))]
    pub description: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ClaimRequest {
    #[validate(length(min = 1, message = "클레임 타입이 필요합니다"))]
    pub claim_type: String,

    #[validate(length(min = 1, message = "클레임 값이 필요합니다"))]
    pub claim_value: String,
}

/// 외부 로그인 기록 추가/삭제 요청
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRecordRequest {
    pub login_provider: AuthProvider,

    #[validate(length(min = 1, message = "프로바이더 키가 필요합니다"))]
    pub provider_key: String,
}

/// 역할 생성 및 이름 변경 요청
#[derive(Debug, Deserialize, Validate)]
pub struct RoleRequest {
    #[validate(length(min = 1, max = 50, message = "역할 이름은 1-50자 사이여야 합니다"))]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_range() {
        let ok: ProductDescriptionRequest = serde_json::from_str(r#"{"rating": 5, "description": "Great"}"#).unwrap();
        assert!(ok.validate().is_ok());

        let zero: ProductDescriptionRequest = serde_json::from_str(r#"{"rating": 0}"#).unwrap();
        assert!(zero.validate().is_err());

        let six: ProductDescriptionRequest = serde_json::from_str(r#"{"rating": 6}"#).unwrap();
        assert!(six.validate().is_err());
    }

    #[test]
    fn test_login_record_provider_is_parsed() {
        let request: LoginRecordRequest =
            serde_json::from_str(r#"{"login_provider": "google", "provider_key": "1234"}"#).unwrap();
        assert_eq!(request.login_provider, AuthProvider::Google);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_blank_phone_number_becomes_none() {
        let request: UpdateProfileRequest = serde_json::from_str(r#"{"phone_number": "  "}"#).unwrap();
        assert_eq!(request.phone_number, None);
        assert_eq!(request.email_confirmed, None);
    }
}
