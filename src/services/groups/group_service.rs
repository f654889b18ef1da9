//! 그룹 서비스
//!
//! 그룹을 만들면 만든 사용자가 관리자이자 게시판 생성 권한을 가진 확정 멤버가 됩니다.
//! 그룹 삭제는 소프트 삭제이며, 삭제된 그룹은 조회되지 않습니다.

use std::sync::Arc;

use mongodb::bson::DateTime;
use validator::Validate;
use singleton_macro::service;

use crate::domain::dto::groups::request::GroupRequest;
use crate::domain::dto::groups::response::GroupResponse;
use crate::domain::entities::groups::{Group, GroupUser};
use crate::errors::errors::AppError;
use crate::repositories::groups::GroupRepository;
use crate::repositories::parse_object_id;
use crate::services::groups::access::{ensure_admin, load_active_group};

#[service(name = "group")]
pub struct GroupService {
    group_repo: Arc<GroupRepository>,
}

impl GroupService {
    pub fn with_dependencies(group_repo: Arc<GroupRepository>) -> Self {
        Self { group_repo }
    }

    pub async fn create(&self, admin_id: &str, request: GroupRequest) -> Result<GroupResponse, AppError> {
        request.validate()?;
        let admin_id = parse_object_id(admin_id)?;

        let group = Group::new(admin_id, request.name.trim().to_string(), request.information);
        let group = self.group_repo.insert_group(group).await?;

        let group_id = group.id.ok_or_else(|| AppError::InternalError("그룹 id가 없습니다".to_string()))?;
        self.group_repo.insert_member(GroupUser::admin(group_id, admin_id)).await?;

        log::info!("👥 Group created: {} by {}", group.name, admin_id);
        Ok(GroupResponse::from(group))
    }

    /// 그룹 정보 변경 (관리자 전용)
    pub async fn update(&self, user_id: &str, group_id: &str, request: GroupRequest) -> Result<GroupResponse, AppError> {
        request.validate()?;
        let user_id = parse_object_id(user_id)?;
        let group_id = parse_object_id(group_id)?;

        let mut group = load_active_group(&self.group_repo, &group_id).await?;
        ensure_admin(&group, &user_id)?;

        group.name = request.name.trim().to_string();
        group.information = request.information;
        group.modified_at = Some(DateTime::now());
        self.group_repo.update_group(&group).await?;

        Ok(GroupResponse::from(group))
    }

    /// 그룹 소프트 삭제 (관리자 전용)
    pub async fn delete(&self, user_id: &str, group_id: &str) -> Result<(), AppError> {
        let user_id = parse_object_id(user_id)?;
        let group_id = parse_object_id(group_id)?;

        let mut group = load_active_group(&self.group_repo, &group_id).await?;
        ensure_admin(&group, &user_id)?;

        group.soft_delete();
        self.group_repo.update_group(&group).await?;
        log::info!("👥 Group deleted: {}", group.name);
        Ok(())
    }

    /// 삭제되지 않은 그룹만 반환합니다.
    pub async fn find_by_id(&self, group_id: &str) -> Result<Option<GroupResponse>, AppError> {
        let group_id = parse_object_id(group_id)?;
        Ok(self.group_repo
            .find_group(&group_id)
            .await?
            .filter(|group| group.is_not_deleted)
            .map(GroupResponse::from))
    }

    pub async fn find_by_admin(&self, admin_id: &str) -> Result<Vec<GroupResponse>, AppError> {
        let admin_id = parse_object_id(admin_id)?;
        let groups = self.group_repo.find_groups_by_admin(&admin_id).await?;
        Ok(groups.into_iter().map(GroupResponse::from).collect())
    }
}
