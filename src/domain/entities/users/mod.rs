//! Users Entity Module
//!
//! - [`user`] - 사용자, 클레임, 외부 로그인, 상품 설명
//! - [`role`] - 역할
//!
//! ```rust,ignore
//! use crate::domain::entities::users::User;
//!
//! let user = User::new("anna@example.com".into(), "anna".into(), password_hash);
//! assert!(user.has_role("user"));
//! ```

pub mod user;
pub mod role;

pub use user::{User, UserClaim, UserLogin, UserProductDescription, ADMIN_ROLE, DEFAULT_ROLE};
pub use role::Role;
