//! # Product Catalog HTTP Handlers
//!
//! 조회는 공개, 변경은 인증이 필요합니다. 공개 라우트와 변경 라우트가
//! `/api/products` 접두어를 공유하므로 인증은 라우트 단위 `wrap`으로 겁니다.
//!
//! | 메서드 | 경로 | 인증 |
//! |--------|------|------|
//! | `GET` | `/api/products` | 공개 |
//! | `GET` | `/api/products/{id}` | 공개 |
//! | `GET` | `/api/products/by-name/{name}` | 공개 |
//! | `GET` | `/api/products/by-category/{category_id}` | 공개 |
//! | `POST` | `/api/products` | 사용자 |
//! | `POST` | `/api/products/barcode` | 사용자 |
//! | `PUT` | `/api/products/{id}` | 사용자 |
//! | `PUT` | `/api/products/{id}/category/{category_id}` | 사용자 |
//! | `DELETE` | `/api/products/{id}` | 관리자 |
//!
//! 상품 저장은 MongoDB와 검색 인덱스에 함께 기록됩니다.

use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::domain::dto::products::request::{AddProductRequest, UpdateProductRequest};
use crate::domain::entities::products::Barcode;
use crate::errors::errors::AppError;
use crate::handlers::no_content_or_not_found;
use crate::middlewares::AuthMiddleware;
use crate::services::products::ProductService;

fn product_not_found(key: &str) -> AppError {
    AppError::NotFound(format!("상품을 찾을 수 없습니다: {}", key))
}

#[get("")]
pub async fn get_products() -> Result<HttpResponse, AppError> {
    let products = ProductService::instance().get_all().await?;
    Ok(HttpResponse::Ok().json(products))
}

#[get("/by-name/{name}")]
pub async fn get_product_by_name(name: web::Path<String>) -> Result<HttpResponse, AppError> {
    let product = ProductService::instance()
        .get_by_name(&name)
        .await?
        .ok_or_else(|| product_not_found(&name))?;
    Ok(HttpResponse::Ok().json(product))
}

#[get("/by-category/{category_id}")]
pub async fn get_products_by_category(category_id: web::Path<String>) -> Result<HttpResponse, AppError> {
    let products = ProductService::instance().get_by_category(&category_id).await?;
    Ok(HttpResponse::Ok().json(products))
}

#[get("/{id}")]
pub async fn get_product(id: web::Path<String>) -> Result<HttpResponse, AppError> {
    let product = ProductService::instance()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| product_not_found(&id))?;
    Ok(HttpResponse::Ok().json(product))
}

/// 이름으로 상품 추가
///
/// ```json
/// { "name": "Oat milk 1L", "description": "Tetra Pak", "price": 3.2 }
/// ```
///
/// 같은 이름(대소문자 무시)의 상품이 있으면 409 Conflict.
#[post("", wrap = "AuthMiddleware::required()")]
pub async fn add_product(payload: web::Json<AddProductRequest>) -> Result<HttpResponse, AppError> {
    let name = payload.name.clone();
    let product = ProductService::instance()
        .add_by_name(payload.into_inner())
        .await?
        .ok_or_else(|| AppError::ConflictError(format!("이미 존재하는 상품입니다: {}", name)))?;
    Ok(HttpResponse::Created().json(product))
}

/// 바코드로 상품 추가
///
/// 이미 알려진 바코드면 기존 상품 id와 200을, 새로 만들었으면 201을 반환합니다.
#[post("/barcode", wrap = "AuthMiddleware::required()")]
pub async fn add_product_by_barcode(payload: web::Json<Barcode>) -> Result<HttpResponse, AppError> {
    let result = ProductService::instance().add_by_barcode(payload.into_inner()).await?;
    if result.created {
        Ok(HttpResponse::Created().json(result))
    } else {
        Ok(HttpResponse::Ok().json(result))
    }
}

#[put("/{id}", wrap = "AuthMiddleware::required()")]
pub async fn update_product(
    id: web::Path<String>,
    payload: web::Json<UpdateProductRequest>,
) -> Result<HttpResponse, AppError> {
    let product = ProductService::instance()
        .update(&id, payload.into_inner())
        .await?
        .ok_or_else(|| product_not_found(&id))?;
    Ok(HttpResponse::Ok().json(product))
}

#[put("/{id}/category/{category_id}", wrap = "AuthMiddleware::required()")]
pub async fn add_product_to_category(path: web::Path<(String, String)>) -> Result<HttpResponse, AppError> {
    let (id, category_id) = path.into_inner();

    if !ProductService::instance().add_to_category(&id, &category_id).await? {
        return Err(AppError::NotFound(format!("상품 또는 카테고리를 찾을 수 없습니다: {} / {}", id, category_id)));
    }
    Ok(HttpResponse::Ok().finish())
}

#[delete("/{id}", wrap = "AuthMiddleware::admin()")]
pub async fn delete_product(id: web::Path<String>) -> Result<HttpResponse, AppError> {
    let deleted = ProductService::instance().delete(&id).await?;
    no_content_or_not_found(deleted, "상품")
}
