//! # Domain Entities Module
//!
//! MongoDB 문서와 1:1로 대응되는 엔티티들입니다.
//!
//! | 모듈 | 컬렉션 |
//! |------|--------|
//! | [`products`] | `products`, `categories` |
//! | [`users`] | `users`, `roles` |
//! | [`groups`] | `groups`, `group_users`, `group_boards`, `group_comments`, `group_products` |
//! | [`donations`] | `donations`, `donors`, `addresses` |
//!
//! 모든 엔티티의 `_id`는 `Option<ObjectId>`이며 삽입 시 채워집니다.
//! 기부자만 예외로, 결제 서비스의 payer id 문자열을 그대로 `_id`로 사용합니다.
//!
//! 엔티티에는 저장소와 무관한 순수 도메인 규칙만 둡니다.
//!
//! ```rust,ignore
//! let mut product = Product::new("Kefir");
//! product.apply_summary(RatingSummary::from_ratings(&[5, 4]));
//!
//! let membership = GroupUser::invitation(group_id, user_id);
//! assert!(!membership.can_create_boards());
//! ```

pub mod products;
pub mod users;
pub mod groups;
pub mod donations;
