//! WasteProducts 백엔드
//!
//! 제품 카탈로그, 사용자 커뮤니티(친구, 평점, 그룹), 기부 기록을 제공하는
//! Rust 기반 REST 서비스입니다. 제품 저장 시 MongoDB와 함께 내장 전문 검색
//! 인덱스(tantivy)에 이중 기록하여 키워드 검색을 지원합니다.
//!
//! # Features
//!
//! - **제품 카탈로그**: 제품, 카테고리, 바코드 조회
//! - **사용자 관리**: 회원가입, JWT 로그인, 친구, 제품 평점/설명, 역할, 클레임
//! - **그룹**: 그룹, 멤버 초대, 보드, 댓글, 보드 제품
//! - **기부**: 기부자/주소 병합 규칙을 따르는 기부 기록
//! - **전문 검색**: 필드별 가중치와 접두어 와일드카드를 지원하는 제품 검색
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 로직
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 데이터 액세스
//! └─────────────────┘
//!          │
//!          ▼
//! ┌──────────────────────────────┐
//! │ MongoDB + Redis + 검색 인덱스 │ ← 저장소
//! └──────────────────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use waste_products::domain::dto::products::request::AddProductRequest;
//! use waste_products::domain::dto::search::SearchQuery;
//! use waste_products::services::products::ProductService;
//! use waste_products::services::search::SearchService;
//!
//! let created = ProductService::instance()
//!     .add_by_name(AddProductRequest { name: "Oat milk".into(), description: None, price: None })
//!     .await?;
//!
//! let results = SearchService::instance().search_products(&SearchQuery {
//!     query: "oat".into(),
//!     fields: None,
//!     limit: Some(10),
//! })?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod search;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod errors;
pub mod middlewares;
