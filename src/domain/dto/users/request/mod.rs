//! # 사용자 관련 요청 DTO 모듈
//!
//! 검증 실패 시 `validator::ValidationErrors`가 발생하며,
//! `AppError::ValidationError`를 거쳐 HTTP 400 응답으로 변환됩니다.
//!
//! ```rust,ignore
//! async fn register(payload: web::Json<RegisterRequest>) -> Result<HttpResponse, AppError> {
//!     payload.validate()?;
//!     // ...
//! }
//! ```

pub mod auth_request;
pub mod create_user_request;
pub mod user_request;

pub use auth_request::{LoginRequest, RefreshTokenRequest};
pub use create_user_request::RegisterRequest;
pub use user_request::{
    ClaimRequest, LoginRecordRequest, ProductDescriptionRequest, ResetPasswordRequest,
    RoleRequest, UpdateEmailRequest, UpdateProfileRequest, UpdateUsernameRequest,
};
