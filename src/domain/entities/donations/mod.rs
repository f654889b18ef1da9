//! Donation Entities
//!
//! 기부(`donations`) → 기부자(`donors`) → 주소(`addresses`) 순으로 참조합니다.
//! 기부자 병합 규칙은 [`donor::plan_donor_update`]에 있습니다.

pub mod address;
pub mod donor;
pub mod donation;

pub use address::Address;
pub use donor::{plan_donor_update, Donor, DonorUpdate};
pub use donation::Donation;
