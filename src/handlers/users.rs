//! # User Management HTTP Handlers
//!
//! 사용자 계정과 사용자에 매달린 하위 리소스(친구, 상품 평점, 역할, 클레임,
//! 외부 로그인 기록)를 다룹니다. 스코프 전체가 인증을 요구하며, 경로의 `{id}`는
//! 토큰 주체 본인이거나 호출자가 관리자여야 합니다. 목록 조회와 역할 부여/회수는
//! 관리자 전용입니다.

use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;

use crate::domain::dto::users::request::{
    ClaimRequest, LoginRecordRequest, ProductDescriptionRequest, ResetPasswordRequest,
    UpdateEmailRequest, UpdateProfileRequest, UpdateUsernameRequest,
};
use crate::domain::models::auth::authenticated_user::AuthenticatedUser;
use crate::errors::errors::AppError;
use crate::handlers::{ensure_self_or_admin, no_content_or_not_found};
use crate::middlewares::AuthMiddleware;
use crate::services::users::UserService;

#[get("", wrap = "AuthMiddleware::admin()")]
pub async fn get_users() -> Result<HttpResponse, AppError> {
    let users = UserService::instance().get_all().await?;
    Ok(HttpResponse::Ok().json(users))
}

#[get("/{id}")]
pub async fn get_user(user: AuthenticatedUser, id: web::Path<String>) -> Result<HttpResponse, AppError> {
    ensure_self_or_admin(&user, &id)?;

    let profile = UserService::instance().get_by_id(&id).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// 전화번호와 이메일 확인 여부 수정. 주어진 필드만 변경됩니다.
#[put("/{id}")]
pub async fn update_user(
    user: AuthenticatedUser,
    id: web::Path<String>,
    payload: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, AppError> {
    ensure_self_or_admin(&user, &id)?;
    payload.validate()?;

    let profile = UserService::instance().update_profile(&id, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// 사용자 삭제
///
/// 다른 사용자들의 친구 목록에서도 제거됩니다.
#[delete("/{id}")]
pub async fn delete_user(user: AuthenticatedUser, id: web::Path<String>) -> Result<HttpResponse, AppError> {
    ensure_self_or_admin(&user, &id)?;

    let deleted = UserService::instance().delete(&id).await?;
    no_content_or_not_found(deleted, "사용자")
}

/// 이메일 변경. 이미 사용 중이면 409.
#[put("/{id}/email")]
pub async fn update_email(
    user: AuthenticatedUser,
    id: web::Path<String>,
    payload: web::Json<UpdateEmailRequest>,
) -> Result<HttpResponse, AppError> {
    ensure_self_or_admin(&user, &id)?;
    payload.validate()?;

    if !UserService::instance().update_email(&id, &payload.email).await? {
        return Err(AppError::ConflictError(format!("이미 사용 중인 이메일입니다: {}", payload.email)));
    }
    Ok(HttpResponse::Ok().json(serde_json::json!({ "email": payload.email.to_lowercase() })))
}

#[put("/{id}/username")]
pub async fn update_username(
    user: AuthenticatedUser,
    id: web::Path<String>,
    payload: web::Json<UpdateUsernameRequest>,
) -> Result<HttpResponse, AppError> {
    ensure_self_or_admin(&user, &id)?;
    payload.validate()?;

    if !UserService::instance().update_username(&id, &payload.username).await? {
        return Err(AppError::ConflictError(format!("이미 사용 중인 사용자명입니다: {}", payload.username)));
    }
    Ok(HttpResponse::Ok().json(serde_json::json!({ "username": payload.username })))
}

/// 비밀번호 변경
///
/// 현재 비밀번호가 틀리면 400을 반환합니다.
#[put("/{id}/password")]
pub async fn reset_password(
    user: AuthenticatedUser,
    id: web::Path<String>,
    payload: web::Json<ResetPasswordRequest>,
) -> Result<HttpResponse, AppError> {
    ensure_self_or_admin(&user, &id)?;
    payload.validate()?;

    UserService::instance().reset_password(&id, payload.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[get("/{id}/friends")]
pub async fn get_friends(user: AuthenticatedUser, id: web::Path<String>) -> Result<HttpResponse, AppError> {
    ensure_self_or_admin(&user, &id)?;

    let friends = UserService::instance().get_friends(&id).await?;
    Ok(HttpResponse::Ok().json(friends))
}

/// 친구 추가 (단방향)
#[post("/{id}/friends/{friend_id}")]
pub async fn add_friend(
    user: AuthenticatedUser,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (id, friend_id) = path.into_inner();
    ensure_self_or_admin(&user, &id)?;

    UserService::instance().add_friend(&id, &friend_id).await?;
    Ok(HttpResponse::Created().finish())
}

#[delete("/{id}/friends/{friend_id}")]
pub async fn delete_friend(
    user: AuthenticatedUser,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (id, friend_id) = path.into_inner();
    ensure_self_or_admin(&user, &id)?;

    UserService::instance().delete_friend(&id, &friend_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[get("/{id}/products")]
pub async fn get_product_descriptions(
    user: AuthenticatedUser,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    ensure_self_or_admin(&user, &id)?;

    let descriptions = UserService::instance().get_product_descriptions(&id).await?;
    Ok(HttpResponse::Ok().json(descriptions))
}

/// 상품 평점과 설명 등록
///
/// 같은 상품에 다시 등록하면 기존 평점을 대체하고, 상품의 평균 평점이 함께 갱신됩니다.
///
/// ```json
/// { "rating": 4, "description": "Glass bottle, easy to recycle" }
/// ```
#[post("/{id}/products/{product_id}")]
pub async fn add_product_description(
    user: AuthenticatedUser,
    path: web::Path<(String, String)>,
    payload: web::Json<ProductDescriptionRequest>,
) -> Result<HttpResponse, AppError> {
    let (id, product_id) = path.into_inner();
    ensure_self_or_admin(&user, &id)?;
    payload.validate()?;

    let added = UserService::instance()
        .add_product_description(&id, &product_id, payload.into_inner())
        .await?;
    if !added {
        return Err(AppError::NotFound(format!("사용자 또는 상품을 찾을 수 없습니다: {}", product_id)));
    }
    Ok(HttpResponse::Created().finish())
}

#[delete("/{id}/products/{product_id}")]
pub async fn delete_product_description(
    user: AuthenticatedUser,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (id, product_id) = path.into_inner();
    ensure_self_or_admin(&user, &id)?;

    let deleted = UserService::instance().delete_product_description(&id, &product_id).await?;
    no_content_or_not_found(deleted, "상품 평점")
}

#[get("/{id}/roles")]
pub async fn get_roles(user: AuthenticatedUser, id: web::Path<String>) -> Result<HttpResponse, AppError> {
    ensure_self_or_admin(&user, &id)?;

    let roles = UserService::instance().get_roles(&id).await?;
    Ok(HttpResponse::Ok().json(roles))
}

#[post("/{id}/roles/{role}", wrap = "AuthMiddleware::admin()")]
pub async fn add_to_role(path: web::Path<(String, String)>) -> Result<HttpResponse, AppError> {
    let (id, role) = path.into_inner();

    UserService::instance().add_to_role(&id, &role).await?;
    Ok(HttpResponse::Created().finish())
}

#[delete("/{id}/roles/{role}", wrap = "AuthMiddleware::admin()")]
pub async fn remove_from_role(path: web::Path<(String, String)>) -> Result<HttpResponse, AppError> {
    let (id, role) = path.into_inner();

    UserService::instance().remove_from_role(&id, &role).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[post("/{id}/claims")]
pub async fn add_claim(
    user: AuthenticatedUser,
    id: web::Path<String>,
    payload: web::Json<ClaimRequest>,
) -> Result<HttpResponse, AppError> {
    ensure_self_or_admin(&user, &id)?;
    payload.validate()?;

    UserService::instance().add_claim(&id, payload.into_inner()).await?;
    Ok(HttpResponse::Created().finish())
}

#[post("/{id}/claims/delete")]
pub async fn remove_claim(
    user: AuthenticatedUser,
    id: web::Path<String>,
    payload: web::Json<ClaimRequest>,
) -> Result<HttpResponse, AppError> {
    ensure_self_or_admin(&user, &id)?;
    payload.validate()?;

    UserService::instance().remove_claim(&id, payload.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// 외부 로그인 기록 추가
///
/// ```json
/// { "login_provider": "google", "provider_key": "109876543210" }
/// ```
#[post("/{id}/logins")]
pub async fn add_login(
    user: AuthenticatedUser,
    id: web::Path<String>,
    payload: web::Json<LoginRecordRequest>,
) -> Result<HttpResponse, AppError> {
    ensure_self_or_admin(&user, &id)?;
    payload.validate()?;

    UserService::instance().add_login(&id, payload.into_inner()).await?;
    Ok(HttpResponse::Created().finish())
}

#[post("/{id}/logins/delete")]
pub async fn remove_login(
    user: AuthenticatedUser,
    id: web::Path<String>,
    payload: web::Json<LoginRecordRequest>,
) -> Result<HttpResponse, AppError> {
    ensure_self_or_admin(&user, &id)?;
    payload.validate()?;

    UserService::instance().remove_login(&id, payload.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
