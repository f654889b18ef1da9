//! 사용자 관련 응답 DTO
//!
//! 모든 응답은 엔티티로부터 `From` 변환으로 만들어지며 비밀번호 해시를 노출하지 않습니다.

pub mod user_response;

pub use user_response::{FriendResponse, LoginResponse, ProductDescriptionResponse, RoleResponse, UserResponse};
