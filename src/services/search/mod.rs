//! 상품 검색 서비스 모듈

pub mod search_service;

pub use search_service::SearchService;
