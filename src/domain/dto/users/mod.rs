//! 사용자 도메인 DTO
//!
//! - [`request`] - 가입, 로그인, 토큰 갱신, 프로필/이메일/사용자명/비밀번호 변경,
//!   상품 설명, 클레임, 외부 로그인, 역할
//! - [`response`] - 사용자, 친구, 상품 설명, 역할, 로그인 결과

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
