//! 기부 서비스 모듈

pub mod donation_service;

pub use donation_service::DonationService;
