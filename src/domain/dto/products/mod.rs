//! 상품, 카테고리, 바코드 DTO
//!
//! 바코드 요청 본문은 엔티티 [`Barcode`](crate::domain::entities::products::Barcode)를
//! 그대로 사용합니다 (13자리 코드 검증 포함).

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
