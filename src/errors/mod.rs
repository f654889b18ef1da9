//! 에러 모듈
//!
//! [`errors`]에 정의된 `AppError`와 관련 타입을 재export합니다.

pub mod errors;

pub use errors::{AppError, AppResult};
