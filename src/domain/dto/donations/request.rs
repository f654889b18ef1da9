use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::domain::dto::validators::{validate_currency, validate_not_blank};

/// 관리자가 기록하는 기부 요청
#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_fee_within_gross"))]
pub struct RecordDonationRequest {
    #[validate(length(min = 1, max = 64, message = "거래 id는 1-64자 사이여야 합니다"))]
    pub transaction_id: String,

    #[validate(range(exclusive_min = 0.0, message = "기부 금액은 0보다 커야 합니다"))]
    pub gross: f64,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "수수료는 0 이상이어야 합니다"))]
    pub fee: f64,

    #[validate(custom(function = "validate_currency"))]
    pub currency: String,

    /// 결제 시각. 없으면 기록 시각을 사용합니다.
    pub date: Option<DateTime<Utc>>,

    pub memo: Option<String>,

    #[validate(nested)]
    pub donor: DonorRequest,
}

#[derive(Debug, Deserialize, Validate)]
pub struct DonorRequest {
    /// 결제 서비스의 payer id
    #[validate(length(min = 1, max = 64, message = "payer id는 1-64자 사이여야 합니다"))]
    pub payer_id: String,

    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 1, max = 64, message = "이름은 1-64자 사이여야 합니다"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 64, message = "성은 1-64자 사이여야 합니다"))]
    pub last_name: String,

    #[serde(default)]
    pub is_verified: bool,

    #[validate(nested)]
    pub address: AddressRequest,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddressRequest {
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub street: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub zip: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub country: String,
    #[serde(default)]
    pub is_confirmed: bool,
}

fn validate_fee_within_gross(req: &RecordDonationRequest) -> Result<(), ValidationError> {
    if req.fee > req.gross {
        return Err(ValidationError::new("fee_exceeds_gross")
            .with_message("수수료는 기부 금액보다 클 수 없습니다".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_json(gross: f64, fee: f64, currency: &str) -> String {
        serde_json::json!({
            "transaction_id": "9XK12345AB678901C",
            "gross": gross,
            "fee": fee,
            "currency": currency,
            "date": "2024-03-01T10:00:00Z",
            "donor": {
                "payer_id": "PAYER123",
                "email": "ivan@example.by",
                "first_name": "Ivan",
                "last_name": "Petrov",
                "is_verified": true,
                "address": {
                    "name": "Ivan Petrov",
                    "street": "Lenina 1",
                    "city": "Minsk",
                    "zip": "220000",
                    "country": "BY"
                }
            }
        })
        .to_string()
    }

    #[test]
    fn test_valid_donation() {
        let request: RecordDonationRequest = serde_json::from_str(&request_json(10.0, 0.59, "USD")).unwrap();
        assert!(request.validate().is_ok());
        assert!(request.date.is_some());
    }

    #[test]
    fn test_invalid_amounts_and_currency() {
        let zero: RecordDonationRequest = serde_json::from_str(&request_json(0.0, 0.0, "USD")).unwrap();
        assert!(zero.validate().is_err());

        let fee_too_high: RecordDonationRequest = serde_json::from_str(&request_json(1.0, 2.0, "USD")).unwrap();
        assert!(fee_too_high.validate().is_err());

        let currency: RecordDonationRequest = serde_json::from_str(&request_json(1.0, 0.1, "usd")).unwrap();
        assert!(currency.validate().is_err());
    }
}
