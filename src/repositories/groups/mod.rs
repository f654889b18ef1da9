//! 그룹, 멤버십, 게시판, 댓글, 게시판 상품 리포지토리

pub mod group_repo;

pub use group_repo::GroupRepository;
