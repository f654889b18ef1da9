//! # Search HTTP Handlers
//!
//! 상품 전문 검색과 인덱스 관리 엔드포인트입니다.
//!
//! ```bash
//! # 이름과 브랜드에서 "mil"로 시작하는 단어 검색
//! curl "http://localhost:8080/api/search/products?query=mil&fields=name,brand&limit=20"
//! ```
//!
//! `fields`를 생략하면 기본 필드(name, description, brand)를 검색하고,
//! name과 brand에 가중치를 둡니다. 인덱스 관리(optimize, rebuild, clear)는
//! 관리자 전용입니다.

use actix_web::{delete, get, post, web, HttpResponse};

use crate::domain::dto::search::SearchQuery;
use crate::errors::errors::AppError;
use crate::middlewares::AuthMiddleware;
use crate::services::search::SearchService;

#[get("/products")]
pub async fn search_products(query: web::Query<SearchQuery>) -> Result<HttpResponse, AppError> {
    let results = SearchService::instance().search_products(&query)?;
    Ok(HttpResponse::Ok().json(results))
}

#[post("/optimize", wrap = "AuthMiddleware::admin()")]
pub async fn optimize_index() -> Result<HttpResponse, AppError> {
    SearchService::instance().optimize()?;
    Ok(HttpResponse::NoContent().finish())
}

/// MongoDB의 전체 상품으로 인덱스를 다시 만듭니다.
#[post("/rebuild", wrap = "AuthMiddleware::admin()")]
pub async fn rebuild_index() -> Result<HttpResponse, AppError> {
    let indexed = SearchService::instance().rebuild().await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "indexed": indexed })))
}

#[delete("", wrap = "AuthMiddleware::admin()")]
pub async fn clear_index() -> Result<HttpResponse, AppError> {
    SearchService::instance().clear()?;
    Ok(HttpResponse::NoContent().finish())
}
