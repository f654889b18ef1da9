//! 기부, 기부자, 주소 리포지토리

pub mod donation_repo;

pub use donation_repo::DonationRepository;
