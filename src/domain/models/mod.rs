//! # Domain Models
//!
//! 저장되지 않는 도메인 모델입니다.
//!
//! - [`auth`] - 인증된 요청의 사용자 정보와 미들웨어 인증 모드
//! - [`token`] - JWT 클레임과 토큰 쌍
//!
//! ```rust,ignore
//! use crate::domain::models::auth::authenticated_user::AuthenticatedUser;
//!
//! async fn me(user: AuthenticatedUser) -> HttpResponse {
//!     HttpResponse::Ok().json(user)
//! }
//! ```

pub mod auth;
pub mod token;
