//! 사용자 관리 서비스 모듈
//!
//! 사용자 생명주기와 역할 관리를 담당하는 서비스들을 제공합니다.
//!
//! # Features
//!
//! - 회원 가입, 로그인, 토큰 갱신
//! - 프로필, 이메일, 사용자명, 비밀번호 변경
//! - 친구 목록과 상품 평점
//! - 역할, 클레임, 외부 로그인 기록
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::users::UserService;
//!
//! let user_service = UserService::instance();
//! let user = user_service.register(request).await?;
//! ```

pub mod user_service;
pub mod role_service;

pub use user_service::UserService;
pub use role_service::RoleService;
