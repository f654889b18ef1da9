//! # 사용자 관리 서비스 구현
//!
//! 사용자 계정의 전체 생명주기를 관리하는 비즈니스 로직입니다.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         UserService                             │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────┐  │
//! │  │  Registration   │  │ Authentication  │  │    Profile      │  │
//! │  │ • Duplicate Chk │  │ • Password Ver  │  │ • Email/Name    │  │
//! │  │ • Password Hash │  │ • Token Pair    │  │ • Password      │  │
//! │  │ • Default Role  │  │ • Refresh       │  │ • Claims/Logins │  │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────┘  │
//! │  ┌─────────────────┐  ┌─────────────────┐                       │
//! │  │    Friends      │  │ Product Ratings │                       │
//! │  │ • One-way list  │  │ • Upsert/Delete │                       │
//! │  │ • Existence Chk │  │ • Avg Rating    │                       │
//! │  └─────────────────┘  └─────────────────┘                       │
//! └─────────────────────────────────────────────────────────────────┘
//!                                 │
//!                                 ▼
//!        UserRepository · RoleRepository · ProductRepository
//! ```
//!
//! ## 보안
//!
//! - **bcrypt 해싱**: 환경별 cost (`PasswordConfig::bcrypt_cost`)
//! - **민감 정보 제거**: 응답 DTO에 비밀번호 해시를 넣지 않음
//! - **로그인 실패 메시지 통일**: 이메일 존재 여부를 노출하지 않음

use std::sync::Arc;

use bcrypt::{hash, verify};
use mongodb::bson::oid::ObjectId;
use singleton_macro::service;

use crate::config::PasswordConfig;
use crate::domain::dto::users::request::{
    ClaimRequest, LoginRequest, LoginRecordRequest, ProductDescriptionRequest, RegisterRequest,
    ResetPasswordRequest, UpdateProfileRequest,
};
use crate::domain::dto::users::response::{FriendResponse, LoginResponse, ProductDescriptionResponse, UserResponse};
use crate::domain::entities::users::{User, UserClaim, UserLogin, UserProductDescription};
use crate::errors::errors::AppError;
use crate::repositories::parse_object_id;
use crate::repositories::products::ProductRepository;
use crate::repositories::users::{RoleRepository, UserRepository};
use crate::services::auth::TokenService;

const INVALID_CREDENTIALS: &str = "이메일 또는 비밀번호가 올바르지 않습니다";

/// 사용자 관리 비즈니스 로직 서비스
///
/// ## 에러 처리 전략
///
/// - **ValidationError**: 입력값 검증 실패, 자기 자신을 친구로 추가
/// - **ConflictError**: 이메일 또는 사용자명 중복 (가입 시)
/// - **AuthenticationError**: 로그인 실패, 잘못된 리프레시 토큰
/// - **NotFound**: 사용자, 역할, 친구가 존재하지 않음
///
/// ## 사용 예제
///
/// ```rust,ignore
/// let user_service = UserService::instance();
/// let login = user_service.login(LoginRequest { email, password }).await?;
/// println!("{}", login.access_token);
/// ```
#[service(name = "user")]
pub struct UserService {
    user_repo: Arc<UserRepository>,
    role_repo: Arc<RoleRepository>,
    product_repo: Arc<ProductRepository>,
    token_service: Arc<TokenService>,
}

impl UserService {
    pub fn with_dependencies(
        user_repo: Arc<UserRepository>,
        role_repo: Arc<RoleRepository>,
        product_repo: Arc<ProductRepository>,
        token_service: Arc<TokenService>,
    ) -> Self {
        Self { user_repo, role_repo, product_repo, token_service }
    }

    fn hash_password(password: &str) -> Result<String, AppError> {
        let start = std::time::Instant::now();
        let password_hash = hash(password, PasswordConfig::bcrypt_cost())
            .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 실패: {}", e)))?;
        log::debug!("Password hashing took: {:?}", start.elapsed());
        Ok(password_hash)
    }

    fn user_not_found(id: &str) -> AppError {
        AppError::NotFound(format!("사용자를 찾을 수 없습니다: {}", id))
    }

    /// 존재하는 사용자와 그 ObjectId를 함께 가져옵니다.
    async fn require_user(&self, id: &str) -> Result<(ObjectId, User), AppError> {
        let object_id = parse_object_id(id)?;
        let user = self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| Self::user_not_found(id))?;
        Ok((object_id, user))
    }

    /// 회원 가입
    ///
    /// 이메일과 사용자명이 모두 사용 가능해야 하며, 기본 역할 `user`가 부여됩니다.
    pub async fn register(&self, request: RegisterRequest) -> Result<UserResponse, AppError> {
        let start_time = std::time::Instant::now();

        if !self.user_repo.is_email_available(&request.email).await? {
            return Err(AppError::ConflictError("이미 사용 중인 이메일입니다".to_string()));
        }
        if !self.user_repo.is_username_available(&request.username).await? {
            return Err(AppError::ConflictError("이미 사용 중인 사용자명입니다".to_string()));
        }

        let password_hash = Self::hash_password(&request.password)?;
        let user = User::new(request.email, request.username.trim().to_string(), password_hash);
        let created = self.user_repo.insert(user).await?;

        log::info!("Total user registration took: {:?}", start_time.elapsed());
        Ok(UserResponse::from(created))
    }

    /// 이메일/비밀번호 로그인
    ///
    /// 성공 시 사용자 정보와 현재 역할이 담긴 토큰 쌍을 반환합니다.
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        let user = self.user_repo
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()))?;

        let matches = verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::InternalError(format!("비밀번호 검증 실패: {}", e)))?;

        if !matches {
            log::warn!("🔒 Failed login attempt for {}", request.email);
            return Err(AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()));
        }

        let tokens = self.token_service.generate_token_pair(&user)?;
        log::info!("🔓 User logged in: {}", user.username);
        Ok(LoginResponse::new(user, tokens))
    }

    /// 리프레시 토큰으로 새 토큰 쌍 발급
    ///
    /// 토큰 주체의 현재 역할을 다시 읽어 새 토큰에 반영합니다.
    pub async fn refresh(&self, refresh_token: &str) -> Result<LoginResponse, AppError> {
        let claims = self.token_service.verify_refresh_token(refresh_token)?;

        let user = self.user_repo
            .find_by_id(&claims.sub)
            .await?
            .ok_or_else(|| AppError::AuthenticationError("토큰의 사용자가 존재하지 않습니다".to_string()))?;

        let tokens = self.token_service.generate_token_pair(&user)?;
        Ok(LoginResponse::new(user, tokens))
    }

    pub async fn get_by_id(&self, id: &str) -> Result<UserResponse, AppError> {
        let (_, user) = self.require_user(id).await?;
        Ok(UserResponse::from(user))
    }

    pub async fn get_all(&self) -> Result<Vec<UserResponse>, AppError> {
        let users = self.user_repo.find_all().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    pub async fn update_profile(&self, id: &str, request: UpdateProfileRequest) -> Result<UserResponse, AppError> {
        let object_id = parse_object_id(id)?;
        if !self.user_repo.update_profile(&object_id, request.phone_number, request.email_confirmed).await? {
            return Err(Self::user_not_found(id));
        }
        self.get_by_id(id).await
    }

    /// 이메일 변경. 이미 사용 중이면 false.
    pub async fn update_email(&self, id: &str, email: &str) -> Result<bool, AppError> {
        let (object_id, _) = self.require_user(id).await?;
        self.user_repo.update_email(&object_id, email).await
    }

    /// 사용자명 변경. 이미 사용 중이면 false.
    pub async fn update_username(&self, id: &str, username: &str) -> Result<bool, AppError> {
        let (object_id, _) = self.require_user(id).await?;
        self.user_repo.update_username(&object_id, username).await
    }

    /// 비밀번호 변경. 기존 비밀번호가 일치해야 합니다.
    pub async fn reset_password(&self, id: &str, request: ResetPasswordRequest) -> Result<(), AppError> {
        let (object_id, user) = self.require_user(id).await?;

        let matches = verify(&request.old_password, &user.password_hash)
            .map_err(|e| AppError::InternalError(format!("비밀번호 검증 실패: {}", e)))?;
        if !matches {
            return Err(AppError::ValidationError("현재 비밀번호가 일치하지 않습니다".to_string()));
        }

        let password_hash = Self::hash_password(&request.new_password)?;
        self.user_repo.update_password_hash(&object_id, &password_hash).await?;
        log::info!("🔑 Password changed for user {}", id);
        Ok(())
    }

    // ---- friends ----

    /// 친구 추가 (단방향)
    pub async fn add_friend(&self, id: &str, friend_id: &str) -> Result<(), AppError> {
        let friend_object_id = parse_object_id(friend_id)?;
        let (object_id, _) = self.require_user(id).await?;

        if object_id == friend_object_id {
            return Err(AppError::ValidationError("자기 자신을 친구로 추가할 수 없습니다".to_string()));
        }
        if self.user_repo.find_by_id(friend_id).await?.is_none() {
            return Err(Self::user_not_found(friend_id));
        }

        self.user_repo.add_friend(&object_id, &friend_object_id).await?;
        Ok(())
    }

    pub async fn delete_friend(&self, id: &str, friend_id: &str) -> Result<(), AppError> {
        let friend_object_id = parse_object_id(friend_id)?;
        let (object_id, _) = self.require_user(id).await?;
        self.user_repo.remove_friend(&object_id, &friend_object_id).await?;
        Ok(())
    }

    pub async fn get_friends(&self, id: &str) -> Result<Vec<FriendResponse>, AppError> {
        let (_, user) = self.require_user(id).await?;
        let friends = self.user_repo.find_by_ids(&user.friend_ids).await?;
        Ok(friends.into_iter().map(FriendResponse::from).collect())
    }

    // ---- product ratings ----

    /// 상품 평점/설명 추가. 같은 상품에 대한 기존 평가는 교체됩니다.
    ///
    /// 사용자나 상품이 없으면 false. 상품의 평균 평점이 함께 갱신됩니다.
    pub async fn add_product_description(
        &self,
        id: &str,
        product_id: &str,
        request: ProductDescriptionRequest,
    ) -> Result<bool, AppError> {
        let object_id = parse_object_id(id)?;
        if self.user_repo.find_by_id(id).await?.is_none() {
            return Ok(false);
        }
        if self.product_repo.find_by_id(product_id).await?.is_none() {
            return Ok(false);
        }
        let product_object_id = parse_object_id(product_id)?;

        let description = UserProductDescription::new(product_object_id, request.rating, request.description);
        self.user_repo.upsert_product_description(&object_id, description).await?;
        self.refresh_rating(&product_object_id).await?;

        Ok(true)
    }

    /// 상품 평점/설명 삭제. 없으면 false.
    pub async fn delete_product_description(&self, id: &str, product_id: &str) -> Result<bool, AppError> {
        let object_id = parse_object_id(id)?;
        let product_object_id = parse_object_id(product_id)?;

        let removed = self.user_repo
            .remove_product_description(&object_id, &product_object_id)
            .await?;
        if removed.is_none() {
            return Ok(false);
        }

        self.refresh_rating(&product_object_id).await?;
        Ok(true)
    }

    /// 저장된 모든 평가로 상품의 평점 집계를 다시 계산합니다. 상품이 없으면 아무 일도 하지 않습니다.
    async fn refresh_rating(&self, product_id: &ObjectId) -> Result<(), AppError> {
        let summary = self.user_repo.rating_summary(product_id).await?;
        self.product_repo.set_rating_summary(product_id, summary).await?;
        Ok(())
    }

    pub async fn get_product_descriptions(&self, id: &str) -> Result<Vec<ProductDescriptionResponse>, AppError> {
        let (_, user) = self.require_user(id).await?;
        Ok(user
            .product_descriptions
            .into_iter()
            .map(ProductDescriptionResponse::from)
            .collect())
    }

    // ---- roles ----

    pub async fn add_to_role(&self, id: &str, role_name: &str) -> Result<(), AppError> {
        let role = self.role_repo
            .find_by_name(role_name)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("역할을 찾을 수 없습니다: {}", role_name)))?;
        let (object_id, _) = self.require_user(id).await?;

        self.user_repo.add_role(&object_id, &role.name).await?;
        log::info!("👥 User {} added to role {}", id, role.name);
        Ok(())
    }

    pub async fn remove_from_role(&self, id: &str, role_name: &str) -> Result<(), AppError> {
        let role = self.role_repo
            .find_by_name(role_name)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("역할을 찾을 수 없습니다: {}", role_name)))?;
        let (object_id, _) = self.require_user(id).await?;

        self.user_repo.remove_role(&object_id, &role.name).await?;
        Ok(())
    }

    pub async fn get_roles(&self, id: &str) -> Result<Vec<String>, AppError> {
        let (_, user) = self.require_user(id).await?;
        Ok(user.roles)
    }

    // ---- claims & logins ----

    pub async fn add_claim(&self, id: &str, request: ClaimRequest) -> Result<(), AppError> {
        let (object_id, _) = self.require_user(id).await?;
        let claim = UserClaim { claim_type: request.claim_type, claim_value: request.claim_value };
        self.user_repo.add_claim(&object_id, &claim).await?;
        Ok(())
    }

    pub async fn remove_claim(&self, id: &str, request: ClaimRequest) -> Result<(), AppError> {
        let (object_id, _) = self.require_user(id).await?;
        let claim = UserClaim { claim_type: request.claim_type, claim_value: request.claim_value };
        self.user_repo.remove_claim(&object_id, &claim).await?;
        Ok(())
    }

    pub async fn add_login(&self, id: &str, request: LoginRecordRequest) -> Result<(), AppError> {
        let (object_id, _) = self.require_user(id).await?;
        let login = UserLogin { login_provider: request.login_provider, provider_key: request.provider_key };
        self.user_repo.add_login(&object_id, &login).await?;
        Ok(())
    }

    pub async fn remove_login(&self, id: &str, request: LoginRecordRequest) -> Result<(), AppError> {
        let (object_id, _) = self.require_user(id).await?;
        let login = UserLogin { login_provider: request.login_provider, provider_key: request.provider_key };
        self.user_repo.remove_login(&object_id, &login).await?;
        Ok(())
    }

    /// 사용자 삭제. 없으면 false.
    /// 사용자 삭제. 사용자가 평가한 상품들의 평점 집계도 다시 계산합니다.
    pub async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let rated: Vec<ObjectId> = match self.user_repo.find_by_id(id).await? {
            Some(user) => user.product_descriptions.iter().map(|d| d.product_id).collect(),
            None => return Ok(false),
        };

        let deleted = self.user_repo.delete(id).await?;
        if !deleted {
            return Ok(false);
        }

        for product_id in &rated {
            self.refresh_rating(product_id).await?;
        }
        log::info!("🗑️ User deleted: {} ({} ratings withdrawn)", id, rated.len());
        Ok(true)
    }
}
