//! # Core Framework Module
//!
//! 백엔드 서비스를 위한 핵심 프레임워크 기능을 제공하는 모듈입니다.
//!
//! ## 모듈 구성
//!
//! ### [`registry`] - 의존성 주입 컨테이너
//! - **ServiceLocator**: Spring의 ApplicationContext + BeanFactory 역할
//! - **자동 레지스트리**: `inventory` 기반 컴파일 타임 컴포넌트 수집
//! - **싱글톤 관리**: Thread-safe한 인스턴스 생명주기 관리
//! - **`#[service]` / `#[repository]`**: `singleton_macro`가 등록과 `instance()` 접근자를 생성
//!
//! 에러 타입은 [`crate::errors`]에 있으며 편의를 위해 여기서도 재export합니다.
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use singleton_macro::service;
//!
//! #[service(name = "product")]
//! pub struct ProductService {
//!     product_repo: Arc<ProductRepository>,   // ServiceLocator에서 자동 주입
//! }
//!
//! let service = ProductService::instance();
//! ```

pub mod registry;

pub use crate::errors::errors::{AppError, AppResult};
