//! 미들웨어 모듈
//!
//! ActixWeb 요청 처리 파이프라인에서 사용되는 미들웨어들을 제공합니다.
//!
//! # 제공 미들웨어
//!
//! ### 인증 미들웨어 (AuthMiddleware)
//! - Bearer 액세스 토큰 추출 및 검증 (리프레시 토큰 거부)
//! - 사용자 정보를 request extension에 저장
//! - 선택적/강제 인증 모드, 역할 요구 지원
//!
//! ## 특정 스코프에만 적용
//! ```rust,ignore
//! use actix_web::{web, App};
//!
//! App::new()
//!     .service(
//!         web::scope("/api/roles")
//!             .wrap(AuthMiddleware::admin())
//!             .route("", web::get().to(get_roles))
//!     )
//!     .service(
//!         web::scope("/api/products")
//!             .route("", web::get().to(get_products))
//!     )
//! ```

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::AuthMiddleware;
