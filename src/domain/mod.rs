//! # Domain Layer Module
//!
//! 도메인 계층은 저장되는 엔티티, API 계약(DTO), 인증 모델로 구성됩니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── entities   - MongoDB 문서 (상품, 사용자, 그룹, 기부)
//! ├── dto        - 요청/응답 본문과 검증 규칙
//! └── models     - 인증된 사용자, JWT 클레임
//!      │
//!      ▼
//! Services → Repositories → MongoDB / Redis / 검색 인덱스
//! ```
//!
//! ## Spring Framework와의 비교
//!
//! | Spring | 이 시스템 | 역할 |
//! |--------|-----------|------|
//! | `@Entity` | `entities` 모듈 | 저장되는 비즈니스 객체 |
//! | `@RequestBody` / `@ResponseBody` | `dto` 모듈 | API 계약 정의 |
//! | `@Valid` | `validator::Validate` | 입력값 검증 |
//! | ModelMapper | `impl From<Entity> for Response` | 응답 변환 |
//!
//! 엔티티에는 평점 집계, 멤버십 권한, 기부자 병합 판단처럼 저장소와 무관한
//! 순수 규칙만 두며, 이런 규칙은 DB 없이 단위 테스트합니다.

pub mod entities;
pub mod dto;
pub mod models;

pub use entities::products::{Barcode, Category, Product, RatingSummary};
pub use entities::users::{Role, User};
pub use entities::groups::{Group, GroupBoard, GroupComment, GroupProduct, GroupUser};
pub use entities::donations::{Address, Donation, Donor};
pub use models::auth::authenticated_user::AuthenticatedUser;
pub use models::token::token::{TokenClaims, TokenPair};

#[cfg(test)]
mod tests {
    use super::{Product, RatingSummary, User};

    #[test]
    fn test_top_level_reexports_point_at_entities() {
        let mut product = Product::new("Kefir");
        product.apply_summary(RatingSummary::from_ratings(&[4]));
        assert_eq!(product.rate_count, 1);

        let user = User::new("anna@example.com".to_string(), "anna".to_string(), "hash".to_string());
        assert!(user.product_descriptions.is_empty());
    }
}
