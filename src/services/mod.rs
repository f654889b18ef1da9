//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! `#[service(name = ...)]`로 레지스트리에 등록되는 싱글톤 서비스들입니다.
//! 서비스는 DTO를 반환하며, 리포지토리의 `None`/`false` 결과를 각 연산의
//! 의미에 맞게 해석합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::{products::ProductService, auth::TokenService};
//!
//! let product_service = ProductService::instance();
//! let token_service = TokenService::instance();
//! ```

pub mod auth;
pub mod users;
pub mod products;
pub mod search;
pub mod groups;
pub mod donations;
