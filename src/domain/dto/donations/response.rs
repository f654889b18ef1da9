use serde::{Deserialize, Serialize};

use crate::domain::dto::{format_datetime, id_hex};
use crate::domain::entities::donations::Donation;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonationResponse {
    pub id: String,
    pub transaction_id: String,
    pub donor_id: String,
    pub gross: f64,
    pub fee: f64,
    pub currency: String,
    pub date: String,
    pub memo: Option<String>,
}

impl From<Donation> for DonationResponse {
    fn from(donation: Donation) -> Self {
        Self {
            id: id_hex(donation.id),
            transaction_id: donation.transaction_id,
            donor_id: donation.donor_id,
            gross: donation.gross,
            fee: donation.fee,
            currency: donation.currency,
            date: format_datetime(donation.date),
            memo: donation.memo,
        }
    }
}
