//! 요청 인증 모델
//!
//! - [`authenticated_user`] - 토큰에서 추출한 사용자 (`AuthenticatedUser`, `OptionalUser`)
//! - [`access_rule`] - 미들웨어 접근 규칙 (`AuthMode`, `RequiredRole`)

pub mod authenticated_user;
pub mod access_rule;
