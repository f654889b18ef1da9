//! 상품 카탈로그 서비스 모듈
//!
//! - [`ProductService`] - 상품 추가(이름/바코드), 조회, 변경, 삭제, 카테고리 지정
//! - [`CategoryService`] - 카테고리 추가, 설명 변경, 삭제

pub mod product_service;
pub mod category_service;

pub use product_service::ProductService;
pub use category_service::CategoryService;
