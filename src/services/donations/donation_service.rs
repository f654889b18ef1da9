//! 기부 기록 서비스
//!
//! 관리자가 결제 서비스에서 확인한 거래를 기록합니다. 금액, 통화, 주소를 검증한 뒤
//! 기부자/주소 병합은 [`DonationRepository::add`]에 맡깁니다.

use std::sync::Arc;

use mongodb::bson::DateTime;
use validator::Validate;
use singleton_macro::service;

use crate::domain::dto::donations::request::RecordDonationRequest;
use crate::domain::dto::donations::response::DonationResponse;
use crate::domain::entities::donations::{Address, Donation, Donor};
use crate::errors::errors::AppError;
use crate::repositories::donations::DonationRepository;
use crate::utils::string_utils::clean_optional_string;

#[service(name = "donation")]
pub struct DonationService {
    donation_repo: Arc<DonationRepository>,
}

/// 검증된 요청을 기부, 기부자, 주소 엔티티로 나눕니다.
pub fn split_request(request: RecordDonationRequest) -> Result<(Donation, Donor, Address), AppError> {
    request.validate()?;

    let RecordDonationRequest { transaction_id, gross, fee, currency, date, memo, donor } = request;
    let address = donor.address;

    let address = Address {
        id: None,
        name: address.name.trim().to_string(),
        street: address.street.trim().to_string(),
        city: address.city.trim().to_string(),
        state: address.state.trim().to_string(),
        zip: address.zip.trim().to_string(),
        country: address.country.trim().to_string(),
        is_confirmed: address.is_confirmed,
    };

    let payer_id = donor.payer_id.trim().to_string();
    let donor = Donor {
        id: payer_id.clone(),
        email: donor.email.trim().to_lowercase(),
        first_name: donor.first_name.trim().to_string(),
        last_name: donor.last_name.trim().to_string(),
        is_verified: donor.is_verified,
        address_id: None,
        created_at: DateTime::now(),
        modified_at: None,
    };

    let donation = Donation {
        id: None,
        transaction_id: transaction_id.trim().to_string(),
        donor_id: payer_id,
        gross,
        fee,
        currency,
        date: date
            .map(|date| DateTime::from_millis(date.timestamp_millis()))
            .unwrap_or_else(DateTime::now),
        memo: clean_optional_string(memo),
    };

    Ok((donation, donor, address))
}

impl DonationService {
    pub fn with_dependencies(donation_repo: Arc<DonationRepository>) -> Self {
        Self { donation_repo }
    }

    pub async fn record(&self, request: RecordDonationRequest) -> Result<DonationResponse, AppError> {
        let (donation, donor, address) = split_request(request)?;
        let donation = self.donation_repo.add(donation, donor, address).await?;
        Ok(DonationResponse::from(donation))
    }

    pub async fn get_all(&self) -> Result<Vec<DonationResponse>, AppError> {
        let donations = self.donation_repo.find_all().await?;
        Ok(donations.into_iter().map(DonationResponse::from).collect())
    }

    pub async fn get_by_donor(&self, donor_id: &str) -> Result<Vec<DonationResponse>, AppError> {
        let donations = self.donation_repo.find_by_donor(donor_id).await?;
        Ok(donations.into_iter().map(DonationResponse::from).collect())
    }
}
#[cfg(test)]
mod tests {
    use super::*;

    fn request(gross: f64, fee: f64, currency: &str) -> RecordDonationRequest {
        serde_json::from_value(serde_json::json!({
            "transaction_id": " TX-1 ",
            "gross": gross,
            "fee": fee,
            "currency": currency,
            "date": "2024-03-01T10:00:00Z",
            "memo": "  ",
            "donor": {
                "payer_id": "PAYER1",
                "email": "Ivan@Example.com",
                "first_name": "Ivan",
                "last_name": "Petrov",
                "is_verified": true,
                "address": {
                    "name": "Ivan Petrov",
                    "street": "Lenina 1",
                    "city": "Minsk",
                    "state": "Minsk",
                    "zip": "220000",
                    "country": "BY",
                    "is_confirmed": true
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_split_request_builds_entities() {
        let (donation, donor, address) = split_request(request(10.0, 0.5, "USD")).unwrap();

        assert_eq!(donation.transaction_id, "TX-1");
        assert_eq!(donation.donor_id, "PAYER1");
        assert_eq!(donation.date.timestamp_millis(), 1_709_287_200_000);
        assert!(donation.memo.is_none());
        assert_eq!(donor.email, "ivan@example.com");
        assert_eq!(address.city, "Minsk");
        assert!(address.id.is_none());
    }

    #[test]
    fn test_invalid_amounts_are_rejected() {
        assert!(matches!(split_request(request(0.0, 0.0, "USD")), Err(AppError::ValidationError(_))));
        assert!(matches!(split_request(request(5.0, 6.0, "USD")), Err(AppError::ValidationError(_))));
        assert!(matches!(split_request(request(5.0, 1.0, "usd")), Err(AppError::ValidationError(_))));
    }
}
