//! 인증 및 보안 서비스 모듈
//!
//! JWT 기반 토큰 인증을 담당합니다.
//!
//! # Features
//!
//! - JWT 액세스/리프레시 토큰 생성과 검증
//! - 토큰 종류(access/refresh) 구분
//! - 역할 클레임을 통한 권한 관리
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::TokenService;
//!
//! let token_service = TokenService::instance();
//! let tokens = token_service.generate_token_pair(&user)?;
//! ```

pub mod token_service;

pub use token_service::*;
