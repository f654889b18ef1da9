//! 그룹 서비스 모듈
//!
//! | 서비스 | 담당 |
//! |--------|------|
//! | [`GroupService`] | 그룹 생성, 변경, 소프트 삭제 |
//! | [`GroupUserService`] | 초대, 수락, 탈퇴, 멤버 관리, 게시판 권한 |
//! | [`GroupBoardService`] | 게시판 |
//! | [`GroupCommentService`] | 게시판 댓글 |
//! | [`GroupProductService`] | 게시판에 올린 상품 |
//!
//! 현재 사용자는 항상 인증 토큰에서 옵니다.

pub mod access;
pub mod group_service;
pub mod group_user_service;
pub mod group_board_service;
pub mod group_comment_service;
pub mod group_product_service;

pub use group_service::GroupService;
pub use group_user_service::GroupUserService;
pub use group_board_service::GroupBoardService;
pub use group_comment_service::GroupCommentService;
pub use group_product_service::GroupProductService;
