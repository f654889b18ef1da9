//! 그룹 게시판 서비스

use std::sync::Arc;

use mongodb::bson::DateTime;
use validator::Validate;
use singleton_macro::service;

use crate::domain::dto::groups::request::BoardRequest;
use crate::domain::dto::groups::response::GroupBoardResponse;
use crate::domain::entities::groups::GroupBoard;
use crate::errors::errors::AppError;
use crate::repositories::groups::GroupRepository;
use crate::repositories::parse_object_id;
use crate::services::groups::access::{
    ensure_board_author, ensure_board_deletable, ensure_can_create_boards, load_active_group, load_board_in_group,
};

#[service(name = "group_board")]
pub struct GroupBoardService {
    group_repo: Arc<GroupRepository>,
}

impl GroupBoardService {
    pub fn with_dependencies(group_repo: Arc<GroupRepository>) -> Self {
        Self { group_repo }
    }

    /// 게시판 생성. 게시판 생성 권한이 있는 확정 멤버만 가능합니다.
    pub async fn create(&self, user_id: &str, group_id: &str, request: BoardRequest) -> Result<GroupBoardResponse, AppError> {
        request.validate()?;
        let user_id = parse_object_id(user_id)?;
        let group_id = parse_object_id(group_id)?;

        load_active_group(&self.group_repo, &group_id).await?;
        let member = self.group_repo.find_member(&group_id, &user_id).await?;
        ensure_can_create_boards(member.as_ref())?;

        let board = GroupBoard::new(group_id, user_id, request.name.trim().to_string(), request.information);
        let board = self.group_repo.insert_board(board).await?;
        Ok(GroupBoardResponse::from(board))
    }

    /// 게시판 변경 (작성자 전용)
    pub async fn update(
        &self,
        user_id: &str,
        group_id: &str,
        board_id: &str,
        request: BoardRequest,
    ) -> Result<GroupBoardResponse, AppError> {
        request.validate()?;
        let user_id = parse_object_id(user_id)?;
        let group_id = parse_object_id(group_id)?;
        let board_id = parse_object_id(board_id)?;

        load_active_group(&self.group_repo, &group_id).await?;
        let mut board = load_board_in_group(&self.group_repo, &board_id, &group_id).await?;
        ensure_board_author(&board, &user_id)?;

        board.name = request.name.trim().to_string();
        board.information = request.information;
        board.modified_at = Some(DateTime::now());
        self.group_repo.update_board(&board).await?;

        Ok(GroupBoardResponse::from(board))
    }

    /// 게시판 소프트 삭제 (작성자 또는 그룹 관리자)
    pub async fn delete(&self, user_id: &str, group_id: &str, board_id: &str) -> Result<(), AppError> {
        let user_id = parse_object_id(user_id)?;
        let group_id = parse_object_id(group_id)?;
        let board_id = parse_object_id(board_id)?;

        let group = load_active_group(&self.group_repo, &group_id).await?;
        let mut board = load_board_in_group(&self.group_repo, &board_id, &group_id).await?;
        ensure_board_deletable(&group, &board, &user_id)?;

        board.soft_delete();
        self.group_repo.update_board(&board).await?;
        Ok(())
    }

    /// 없거나 삭제된 게시판은 None
    pub async fn find_by_id(&self, group_id: &str, board_id: &str) -> Result<Option<GroupBoardResponse>, AppError> {
        let group_id = parse_object_id(group_id)?;
        let board_id = parse_object_id(board_id)?;

        Ok(self.group_repo
            .find_board(&board_id)
            .await?
            .filter(|board| board.is_available(&group_id))
            .map(GroupBoardResponse::from))
    }

    pub async fn find_by_group(&self, group_id: &str) -> Result<Vec<GroupBoardResponse>, AppError> {
        let group_id = parse_object_id(group_id)?;
        let boards = self.group_repo.find_boards_by_group(&group_id).await?;
        Ok(boards.into_iter().map(GroupBoardResponse::from).collect())
    }
}
