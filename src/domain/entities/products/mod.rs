//! 상품 카탈로그 엔티티
//!
//! - [`product`] - 상품과 평점 집계
//! - [`category`] - 상품 카테고리
//! - [`barcode`] - 상품에 포함되는 바코드 정보 (별도 컬렉션 없음)

pub mod product;
pub mod category;
pub mod barcode;

pub use product::{Product, RatingSummary};
pub use category::Category;
pub use barcode::Barcode;
