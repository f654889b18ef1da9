//! 그룹 멤버십 서비스
//!
//! 초대 → 수락(또는 거절) 흐름과 멤버 관리, 게시판 생성 권한 부여를 담당합니다.

use std::sync::Arc;

use mongodb::bson::DateTime;
use singleton_macro::service;

use crate::domain::dto::groups::response::GroupUserResponse;
use crate::domain::entities::groups::GroupUser;
use crate::errors::errors::AppError;
use crate::repositories::groups::GroupRepository;
use crate::repositories::parse_object_id;
use crate::repositories::users::UserRepository;
use crate::services::groups::access::{ensure_admin, ensure_not_admin, load_active_group, pending_invitation};

#[service(name = "group_user")]
pub struct GroupUserService {
    group_repo: Arc<GroupRepository>,
    user_repo: Arc<UserRepository>,
}

fn member_not_found() -> AppError {
    AppError::NotFound("그룹 멤버를 찾을 수 없습니다".to_string())
}

impl GroupUserService {
    pub fn with_dependencies(group_repo: Arc<GroupRepository>, user_repo: Arc<UserRepository>) -> Self {
        Self { group_repo, user_repo }
    }

    /// 사용자 초대 (관리자 전용). 이미 멤버거나 초대된 사용자면 ConflictError.
    pub async fn invite(&self, admin_id: &str, group_id: &str, user_id: &str) -> Result<GroupUserResponse, AppError> {
        let admin_id = parse_object_id(admin_id)?;
        let group_id = parse_object_id(group_id)?;
        let invited_id = parse_object_id(user_id)?;

        let group = load_active_group(&self.group_repo, &group_id).await?;
        ensure_admin(&group, &admin_id)?;

        if self.user_repo.find_by_id(user_id).await?.is_none() {
            return Err(AppError::NotFound(format!("사용자를 찾을 수 없습니다: {}", user_id)));
        }
        if self.group_repo.find_member(&group_id, &invited_id).await?.is_some() {
            return Err(AppError::ConflictError("이미 그룹 멤버이거나 초대된 사용자입니다".to_string()));
        }

        let member = self.group_repo
            .insert_member(GroupUser::invitation(group_id, invited_id))
            .await?;
        log::info!("✉️ User {} invited to group {}", invited_id, group_id);
        Ok(GroupUserResponse::from(member))
    }

    pub async fn accept_invitation(&self, user_id: &str, group_id: &str) -> Result<GroupUserResponse, AppError> {
        let user_id = parse_object_id(user_id)?;
        let group_id = parse_object_id(group_id)?;
        load_active_group(&self.group_repo, &group_id).await?;

        let mut member = pending_invitation(self.group_repo.find_member(&group_id, &user_id).await?)?;

        member.is_confirmed = true;
        member.modified_at = Some(DateTime::now());
        self.group_repo.update_member(&member).await?;

        Ok(GroupUserResponse::from(member))
    }

    /// 수락하지 않은 초대를 거절합니다.
    pub async fn dismiss_invitation(&self, user_id: &str, group_id: &str) -> Result<(), AppError> {
        let user_id = parse_object_id(user_id)?;
        let group_id = parse_object_id(group_id)?;

        let member = pending_invitation(self.group_repo.find_member(&group_id, &user_id).await?)?;

        if let Some(id) = member.id {
            self.group_repo.delete_member(&id).await?;
        }
        Ok(())
    }

    /// 그룹 탈퇴. 관리자는 자신의 그룹을 떠날 수 없습니다.
    pub async fn leave(&self, user_id: &str, group_id: &str) -> Result<(), AppError> {
        let user_id = parse_object_id(user_id)?;
        let group_id = parse_object_id(group_id)?;

        let group = load_active_group(&self.group_repo, &group_id).await?;
        ensure_not_admin(&group, &user_id)?;

        let member = self.group_repo
            .find_member(&group_id, &user_id)
            .await?
            .ok_or_else(member_not_found)?;

        if let Some(id) = member.id {
            self.group_repo.delete_member(&id).await?;
        }
        Ok(())
    }

    /// 멤버 제거 (관리자 전용)
    pub async fn remove_member(&self, admin_id: &str, group_id: &str, user_id: &str) -> Result<(), AppError> {
        let admin_id = parse_object_id(admin_id)?;
        let group_id = parse_object_id(group_id)?;
        let user_id = parse_object_id(user_id)?;

        let group = load_active_group(&self.group_repo, &group_id).await?;
        ensure_admin(&group, &admin_id)?;
        ensure_not_admin(&group, &user_id)?;

        let member = self.group_repo
            .find_member(&group_id, &user_id)
            .await?
            .ok_or_else(member_not_found)?;

        if let Some(id) = member.id {
            self.group_repo.delete_member(&id).await?;
        }
        Ok(())
    }

    /// 게시판 생성 권한 부여/회수 (관리자 전용)
    pub async fn set_board_rights(
        &self,
        admin_id: &str,
        group_id: &str,
        user_id: &str,
        granted: bool,
    ) -> Result<GroupUserResponse, AppError> {
        let admin_id = parse_object_id(admin_id)?;
        let group_id = parse_object_id(group_id)?;
        let user_id = parse_object_id(user_id)?;

        let group = load_active_group(&self.group_repo, &group_id).await?;
        ensure_admin(&group, &admin_id)?;

        let mut member = self.group_repo
            .find_member(&group_id, &user_id)
            .await?
            .ok_or_else(member_not_found)?;

        member.right_to_create_boards = granted;
        member.modified_at = Some(DateTime::now());
        self.group_repo.update_member(&member).await?;

        Ok(GroupUserResponse::from(member))
    }

    pub async fn get_members(&self, group_id: &str) -> Result<Vec<GroupUserResponse>, AppError> {
        let group_id = parse_object_id(group_id)?;
        load_active_group(&self.group_repo, &group_id).await?;

        let members = self.group_repo.find_members(&group_id).await?;
        Ok(members.into_iter().map(GroupUserResponse::from).collect())
    }
}
