//! 카테고리 핸들러
//!
//! 카테고리는 이름으로 식별됩니다. 삭제하면 속한 상품들의 카테고리가 해제됩니다.

use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;

use crate::domain::dto::products::request::{
    AddCategoryRequest, CategoryDescriptionRequest, DeleteCategoriesRequest,
};
use crate::errors::errors::AppError;
use crate::handlers::no_content_or_not_found;
use crate::middlewares::AuthMiddleware;
use crate::services::products::CategoryService;

#[get("")]
pub async fn get_categories() -> Result<HttpResponse, AppError> {
    let categories = CategoryService::instance().get_all().await?;
    Ok(HttpResponse::Ok().json(categories))
}

#[get("/{name}")]
pub async fn get_category(name: web::Path<String>) -> Result<HttpResponse, AppError> {
    let category = CategoryService::instance()
        .get(&name)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("카테고리를 찾을 수 없습니다: {}", name)))?;
    Ok(HttpResponse::Ok().json(category))
}

#[post("", wrap = "AuthMiddleware::required()")]
pub async fn add_category(payload: web::Json<AddCategoryRequest>) -> Result<HttpResponse, AppError> {
    let name = payload.name.clone();
    let category = CategoryService::instance()
        .add(payload.into_inner())
        .await?
        .ok_or_else(|| AppError::ConflictError(format!("이미 존재하는 카테고리입니다: {}", name)))?;
    Ok(HttpResponse::Created().json(category))
}

#[put("/{name}/description", wrap = "AuthMiddleware::required()")]
pub async fn set_description(
    name: web::Path<String>,
    payload: web::Json<CategoryDescriptionRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let category = CategoryService::instance()
        .set_description(&name, &payload.description)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("카테고리를 찾을 수 없습니다: {}", name)))?;
    Ok(HttpResponse::Ok().json(category))
}

#[delete("/{name}", wrap = "AuthMiddleware::admin()")]
pub async fn delete_category(name: web::Path<String>) -> Result<HttpResponse, AppError> {
    let deleted = CategoryService::instance().delete(&name).await?;
    no_content_or_not_found(deleted, "카테고리")
}

/// 여러 카테고리 삭제
///
/// ```json
/// { "names": ["Dairy", "Glass"] }
/// ```
///
/// 하나도 삭제되지 않으면 404.
#[post("/delete-range", wrap = "AuthMiddleware::admin()")]
pub async fn delete_categories(payload: web::Json<DeleteCategoriesRequest>) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let deleted = CategoryService::instance().delete_range(&payload.names).await?;
    no_content_or_not_found(deleted, "카테고리")
}
