mod common;

use chrono::Utc;
use common::TestStores;
use waste_products::domain::dto::donations::request::{AddressRequest, DonorRequest, RecordDonationRequest};
use waste_products::errors::errors::AppError;
use waste_products::services::donations::DonationService;

fn donation(transaction_id: &str, street: &str, last_name: &str) -> RecordDonationRequest {
    RecordDonationRequest {
        transaction_id: transaction_id.to_string(),
        gross: 25.0,
        fee: 1.1,
        currency: "USD".to_string(),
        date: Some(Utc::now()),
        memo: None,
        donor: DonorRequest {
            payer_id: "PAYER42".to_string(),
            email: "Donor@Example.com".to_string(),
            first_name: "Ivan".to_string(),
            last_name: last_name.to_string(),
            is_verified: true,
            address: AddressRequest {
                name: "Ivan Petrov".to_string(),
                street: street.to_string(),
                city: "Minsk".to_string(),
                state: String::new(),
                zip: "220030".to_string(),
                country: "BY".to_string(),
                is_confirmed: true,
            },
        },
    }
}

#[actix_web::test]
async fn test_donor_is_merged_across_donations() {
    let Some(stores) = TestStores::connect().await else { return };
    let repo = stores.donation_repo().await;
    let service = DonationService::with_dependencies(repo.clone());

    let first = service.record(donation("TX-1", "Nezavisimosti 4", "Petrov")).await.unwrap();
    assert_eq!(first.donor_id, "PAYER42");
    let donor = repo.find_donor("PAYER42").await.unwrap().unwrap();
    assert_eq!(donor.email, "donor@example.com");
    let first_address = donor.address_id.unwrap();

    // 같은 기부자, 같은 주소: 기부자 문서는 그대로
    service.record(donation("TX-2", "Nezavisimosti 4", "Petrov")).await.unwrap();
    let unchanged = repo.find_donor("PAYER42").await.unwrap().unwrap();
    assert_eq!(unchanged.address_id, Some(first_address));
    assert!(unchanged.modified_at.is_none());

    // 주소가 바뀌면 새 주소로 교체되고 이전 주소는 정리됨
    service.record(donation("TX-3", "Pobediteley 9", "Petrov-Sidorov")).await.unwrap();
    let changed = repo.find_donor("PAYER42").await.unwrap().unwrap();
    assert_eq!(changed.last_name, "Petrov-Sidorov");
    assert_ne!(changed.address_id, Some(first_address));
    assert!(changed.modified_at.is_some());
    assert!(repo.find_address(&first_address).await.unwrap().is_none());

    assert_eq!(service.get_by_donor("PAYER42").await.unwrap().len(), 3);

    let duplicate = service.record(donation("TX-1", "Nezavisimosti 4", "Petrov")).await;
    assert!(matches!(duplicate, Err(AppError::ConflictError(_))));

    stores.cleanup().await;
}
