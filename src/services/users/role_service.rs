//! 역할 관리 서비스
//!
//! 사용자 문서는 역할을 이름으로 보관하므로, 이름 변경과 삭제는 모든 사용자에게 전파됩니다.

use std::sync::Arc;

use singleton_macro::service;

use crate::domain::dto::users::response::{RoleResponse, UserResponse};
use crate::domain::entities::users::Role;
use crate::errors::errors::AppError;
use crate::repositories::parse_object_id;
use crate::repositories::users::{RoleRepository, UserRepository};
use crate::utils::string_utils::validate_required_string;

#[service(name = "role")]
pub struct RoleService {
    role_repo: Arc<RoleRepository>,
    user_repo: Arc<UserRepository>,
}

impl RoleService {
    pub fn with_dependencies(role_repo: Arc<RoleRepository>, user_repo: Arc<UserRepository>) -> Self {
        Self { role_repo, user_repo }
    }

    /// 역할 생성. 같은 이름(대소문자 무시)이 있으면 ConflictError.
    pub async fn create(&self, name: &str) -> Result<RoleResponse, AppError> {
        let name = validate_required_string(name, "역할 이름")?;
        if self.role_repo.find_by_name(&name).await?.is_some() {
            return Err(AppError::ConflictError(format!("역할이 이미 존재합니다: {}", name)));
        }

        let role = self.role_repo.insert(Role::new(&name)).await?;
        Ok(RoleResponse::from(role))
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<RoleResponse>, AppError> {
        let object_id = parse_object_id(id)?;
        Ok(self.role_repo.find_by_id(&object_id).await?.map(RoleResponse::from))
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<RoleResponse>, AppError> {
        Ok(self.role_repo.find_by_name(name).await?.map(RoleResponse::from))
    }

    pub async fn get_all(&self) -> Result<Vec<RoleResponse>, AppError> {
        let roles = self.role_repo.find_all().await?;
        Ok(roles.into_iter().map(RoleResponse::from).collect())
    }

    /// 역할 이름 변경. 역할이 없으면 None.
    pub async fn update_role_name(&self, id: &str, new_name: &str) -> Result<Option<RoleResponse>, AppError> {
        let object_id = parse_object_id(id)?;
        let new_name = validate_required_string(new_name, "역할 이름")?;

        let Some(role) = self.role_repo.find_by_id(&object_id).await? else {
            return Ok(None);
        };

        self.role_repo.rename(&object_id, &new_name).await?;
        let renamed = self.user_repo.rename_role_everywhere(&role.name, &new_name).await?;
        log::info!("🔑 Role {} renamed to {} ({} users)", role.name, new_name, renamed);

        self.find_by_id(id).await
    }

    /// 역할 삭제. 모든 사용자에게서 제거됩니다. 역할이 없으면 false.
    pub async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let object_id = parse_object_id(id)?;

        let Some(role) = self.role_repo.find_by_id(&object_id).await? else {
            return Ok(false);
        };

        self.role_repo.delete(&object_id).await?;
        let affected = self.user_repo.remove_role_everywhere(&role.name).await?;
        log::info!("🔑 Role {} deleted ({} users)", role.name, affected);
        Ok(true)
    }

    pub async fn get_role_users(&self, name: &str) -> Result<Vec<UserResponse>, AppError> {
        let role = self.role_repo
            .find_by_name(name)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("역할을 찾을 수 없습니다: {}", name)))?;

        let users = self.user_repo.find_by_role(&role.name).await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }
}
