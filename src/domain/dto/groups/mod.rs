//! 그룹, 멤버십, 게시판, 댓글, 공유 상품 DTO
//!
//! 요청 본문에는 행위자 id가 없습니다. 행위자는 항상 인증 토큰의 사용자입니다.

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
