//! Group Entities
//!
//! 그룹 → 게시판 → (댓글, 공유 상품) 구조이며, 멤버십은 `GroupUser`로 관리됩니다.
//! 각 엔티티는 별도 컬렉션에 저장되고 ObjectId로 서로를 참조합니다.

pub mod group;
pub mod group_user;
pub mod board;
pub mod comment;
pub mod group_product;

pub use group::Group;
pub use group_user::GroupUser;
pub use board::GroupBoard;
pub use comment::GroupComment;
pub use group_product::GroupProduct;
