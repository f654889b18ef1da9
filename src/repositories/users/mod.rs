//! 사용자 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! [`UserRepository`](user_repo::UserRepository)를 통해 MongoDB 기반 사용자 데이터 관리와
//! Redis 캐싱을 제공하고, [`RoleRepository`](role_repo::RoleRepository)가 역할 목록을 관리합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::users::UserRepository;
//!
//! let user_repo = UserRepository::instance();
//! let user = user_repo.find_by_email("user@example.com").await?;
//! ```

pub mod user_repo;
pub mod role_repo;

pub use user_repo::UserRepository;
pub use role_repo::RoleRepository;
