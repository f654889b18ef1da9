//! # Full-text Search Module
//!
//! 상품 카탈로그를 위한 임베디드 전문 검색 인덱스입니다. `tantivy`를 사용하며,
//! MongoDB에 저장된 상품이 상품 저장 시마다 함께 기록됩니다 (dual-write).
//!
//! ## 구성
//!
//! - [`index`] - `SearchRepository<T>`: 엔티티 타입별 인덱스 (삽입, 교체, 삭제, 검색)
//! - [`query`] - 검색어 정리와 불리언 쿼리 생성
//!
//! ## 일관성 규칙
//!
//! 1. MongoDB 쓰기가 성공한 뒤에만 인덱스에 씁니다.
//! 2. 인덱스 쓰기 실패는 로그로 남기고 요청은 성공시킵니다. 저장소가 원본입니다.
//! 3. 관리자용 `rebuild`가 인덱스를 비우고 저장된 상품 전체를 다시 넣습니다.
//!
//! ```rust,ignore
//! use crate::search::ProductIndex;
//!
//! let index = ProductIndex::open(SearchConfig::index_path())?;
//! index.insert(&product)?;
//!
//! let found = index.get_all_matching("green tea", &fields, &boosts, 20)?;
//! ```

pub mod index;
pub mod query;

pub use index::{SearchRepository, Searchable};

use crate::domain::entities::products::product::Product;

/// 상품 인덱스
pub type ProductIndex = SearchRepository<Product>;
