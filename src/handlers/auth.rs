//! # Authentication HTTP Handlers
//!
//! 로컬 계정 회원가입과 로그인, 토큰 갱신을 처리합니다.
//!
//! | 메서드 | 경로 | 설명 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `POST` | `/api/auth/register` | 회원가입 | 201 Created |
//! | `POST` | `/api/auth/login` | 이메일/비밀번호 로그인 | 200 OK |
//! | `POST` | `/api/auth/refresh` | 리프레시 토큰으로 토큰 쌍 재발급 | 200 OK |
//! | `GET` | `/api/auth/me` | 현재 사용자 정보 | 200 OK |
//!
//! 로그인 실패는 이메일이 없든 비밀번호가 틀리든 같은 401 메시지를 반환합니다.

use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::domain::dto::users::request::{LoginRequest, RefreshTokenRequest, RegisterRequest};
use crate::domain::models::auth::authenticated_user::AuthenticatedUser;
use crate::errors::errors::AppError;
use crate::middlewares::AuthMiddleware;
use crate::services::users::UserService;

/// 회원가입
///
/// ```bash
/// curl -X POST http://localhost:8080/api/auth/register \
///   -H "Content-Type: application/json" \
///   -d '{"email":"anna@example.com","username":"anna_k","password":"Recycle2024","password_confirm":"Recycle2024"}'
/// ```
///
/// 이메일이나 사용자명이 이미 사용 중이면 409 Conflict.
#[post("/register")]
pub async fn register(payload: web::Json<RegisterRequest>) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let user = UserService::instance().register(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(user))
}

/// 로컬 로그인
///
/// 성공하면 사용자 정보와 액세스/리프레시 토큰 쌍을 반환합니다.
///
/// ```json
/// {
///   "user": { "id": "65f0...", "email": "anna@example.com", "roles": ["user"] },
///   "access_token": "eyJ...",
///   "refresh_token": "eyJ...",
///   "token_type": "Bearer",
///   "expires_in": 86400
/// }
/// ```
#[post("/login")]
pub async fn login(payload: web::Json<LoginRequest>) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let response = UserService::instance().login(payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// 리프레시 토큰으로 새 토큰 쌍 발급. 역할은 저장된 사용자에서 다시 읽습니다.
#[post("/refresh")]
pub async fn refresh(payload: web::Json<RefreshTokenRequest>) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let response = UserService::instance().refresh(&payload.refresh_token).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/me", wrap = "AuthMiddleware::required()")]
pub async fn me(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let profile = UserService::instance().get_by_id(&user.user_id).await?;
    Ok(HttpResponse::Ok().json(profile))
}
