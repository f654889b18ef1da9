//! 역할 관리 핸들러 (관리자 전용 스코프)

use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;

use crate::domain::dto::users::request::RoleRequest;
use crate::errors::errors::AppError;
use crate::handlers::no_content_or_not_found;
use crate::services::users::RoleService;

#[post("")]
pub async fn create_role(payload: web::Json<RoleRequest>) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let role = RoleService::instance().create(&payload.name).await?;
    Ok(HttpResponse::Created().json(role))
}

#[get("")]
pub async fn get_roles() -> Result<HttpResponse, AppError> {
    let roles = RoleService::instance().get_all().await?;
    Ok(HttpResponse::Ok().json(roles))
}

#[get("/by-name/{name}")]
pub async fn get_role_by_name(name: web::Path<String>) -> Result<HttpResponse, AppError> {
    let role = RoleService::instance()
        .find_by_name(&name)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("역할을 찾을 수 없습니다: {}", name)))?;
    Ok(HttpResponse::Ok().json(role))
}

/// 역할에 속한 사용자 목록
#[get("/by-name/{name}/users")]
pub async fn get_role_users(name: web::Path<String>) -> Result<HttpResponse, AppError> {
    let users = RoleService::instance().get_role_users(&name).await?;
    Ok(HttpResponse::Ok().json(users))
}

#[get("/{id}")]
pub async fn get_role(id: web::Path<String>) -> Result<HttpResponse, AppError> {
    let role = RoleService::instance()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("역할을 찾을 수 없습니다: {}", id)))?;
    Ok(HttpResponse::Ok().json(role))
}

/// 역할 이름 변경
///
/// 그 역할을 가진 모든 사용자의 역할 목록도 함께 바뀝니다.
#[put("/{id}")]
pub async fn update_role(id: web::Path<String>, payload: web::Json<RoleRequest>) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let role = RoleService::instance()
        .update_role_name(&id, &payload.name)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("역할을 찾을 수 없습니다: {}", id)))?;
    Ok(HttpResponse::Ok().json(role))
}

#[delete("/{id}")]
pub async fn delete_role(id: web::Path<String>) -> Result<HttpResponse, AppError> {
    let deleted = RoleService::instance().delete(&id).await?;
    no_content_or_not_found(deleted, "역할")
}
