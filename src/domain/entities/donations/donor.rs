//! 기부자 엔티티와 기부자 병합 규칙

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::domain::entities::donations::address::Address;

/// 기부자
///
/// id는 결제 서비스의 payer id 문자열입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Donor {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_id: Option<ObjectId>,
    pub created_at: DateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime>,
}

impl Donor {
    /// id, 주소, 타임스탬프를 제외한 프로필 필드가 같은지 비교합니다.
    pub fn same_profile(&self, other: &Donor) -> bool {
        self.email == other.email
            && self.first_name == other.first_name
            && self.last_name == other.last_name
            && self.is_verified == other.is_verified
    }
}

/// 들어온 기부자 정보를 저장된 기부자와 비교한 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DonorUpdate {
    /// 저장된 기부자가 없음. 일치하는 주소를 재사용하거나 새로 만든 뒤 삽입합니다.
    NewDonor,
    /// 프로필과 주소가 모두 같음. 저장된 기부자를 그대로 사용합니다.
    Unchanged,
    /// 프로필 또는 주소가 바뀜. `keep_address`가 true면 저장된 주소 id를 유지합니다.
    Changed { keep_address: bool },
}

/// 기부자 병합 방식을 결정합니다.
///
/// `stored`는 같은 payer id로 저장된 기부자와 그 주소입니다.
pub fn plan_donor_update(
    stored: Option<(&Donor, &Address)>,
    incoming: &Donor,
    incoming_address: &Address,
) -> DonorUpdate {
    match stored {
        None => DonorUpdate::NewDonor,
        Some((donor, address)) => {
            let same_address = address.same_as(incoming_address);
            if same_address && donor.same_profile(incoming) {
                DonorUpdate::Unchanged
            } else {
                DonorUpdate::Changed { keep_address: same_address }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(street: &str) -> Address {
        Address {
            id: Some(ObjectId::new()),
            name: "Ivan Petrov".to_string(),
            street: street.to_string(),
            city: "Minsk".to_string(),
            state: "Minsk".to_string(),
            zip: "220000".to_string(),
            country: "BY".to_string(),
            is_confirmed: true,
        }
    }

    fn donor(email: &str) -> Donor {
        Donor {
            id: "PAYER123".to_string(),
            email: email.to_string(),
            first_name: "Ivan".to_string(),
            last_name: "Petrov".to_string(),
            is_verified: true,
            address_id: None,
            created_at: DateTime::now(),
            modified_at: None,
        }
    }

    #[test]
    fn test_unknown_donor_is_new() {
        assert_eq!(plan_donor_update(None, &donor("a@b.by"), &address("Lenina 1")), DonorUpdate::NewDonor);
    }

    #[test]
    fn test_identical_donor_is_unchanged() {
        let stored = donor("a@b.by");
        let stored_address = address("Lenina 1");
        let mut incoming_address = address("Lenina 1");
        incoming_address.id = None;

        let plan = plan_donor_update(Some((&stored, &stored_address)), &donor("a@b.by"), &incoming_address);
        assert_eq!(plan, DonorUpdate::Unchanged);
    }

    #[test]
    fn test_changed_profile_keeps_same_address() {
        let stored = donor("a@b.by");
        let stored_address = address("Lenina 1");

        let plan = plan_donor_update(Some((&stored, &stored_address)), &donor("new@b.by"), &address("Lenina 1"));
        assert_eq!(plan, DonorUpdate::Changed { keep_address: true });
    }

    #[test]
    fn test_changed_address_is_not_kept() {
        let stored = donor("a@b.by");
        let stored_address = address("Lenina 1");

        let plan = plan_donor_update(Some((&stored, &stored_address)), &donor("a@b.by"), &address("Nemiga 5"));
        assert_eq!(plan, DonorUpdate::Changed { keep_address: false });
    }

    #[test]
    fn test_address_confirmation_is_part_of_identity() {
        let confirmed = address("Lenina 1");
        let mut unconfirmed = address("Lenina 1");
        unconfirmed.is_confirmed = false;
        assert!(!confirmed.same_as(&unconfirmed));
    }
}
