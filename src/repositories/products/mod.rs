//! 상품 카탈로그 리포지토리

pub mod product_repo;
pub mod category_repo;

pub use product_repo::ProductRepository;
pub use category_repo::CategoryRepository;
