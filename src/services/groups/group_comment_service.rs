//! 그룹 게시판 댓글 서비스

use std::sync::Arc;

use mongodb::bson::{oid::ObjectId, DateTime};
use validator::Validate;
use singleton_macro::service;

use crate::domain::dto::groups::request::{CreateCommentRequest, UpdateCommentRequest};
use crate::domain::dto::groups::response::GroupCommentResponse;
use crate::domain::entities::groups::GroupComment;
use crate::errors::errors::AppError;
use crate::repositories::groups::GroupRepository;
use crate::repositories::parse_object_id;
use crate::services::groups::access::{ensure_comment_author, load_active_group, load_board_in_group, load_confirmed_member};

#[service(name = "group_comment")]
pub struct GroupCommentService {
    group_repo: Arc<GroupRepository>,
}

impl GroupCommentService {
    pub fn with_dependencies(group_repo: Arc<GroupRepository>) -> Self {
        Self { group_repo }
    }

    /// 작성자 본인의 댓글을 그룹 범위 안에서 읽습니다.
    async fn load_own_comment(
        &self,
        user_id: &ObjectId,
        group_id: &ObjectId,
        comment_id: &ObjectId,
    ) -> Result<GroupComment, AppError> {
        let comment = self.group_repo
            .find_comment(comment_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("댓글을 찾을 수 없습니다: {}", comment_id)))?;

        load_board_in_group(&self.group_repo, &comment.group_board_id, group_id).await?;

        ensure_comment_author(&comment, user_id)?;
        Ok(comment)
    }

    /// 댓글 작성. 게시판이 그룹에 속해야 하고 작성자는 확정 멤버여야 합니다.
    pub async fn create(&self, user_id: &str, group_id: &str, request: CreateCommentRequest) -> Result<GroupCommentResponse, AppError> {
        request.validate()?;
        let user_id = parse_object_id(user_id)?;
        let group_id = parse_object_id(group_id)?;
        let board_id = parse_object_id(&request.board_id)?;

        load_active_group(&self.group_repo, &group_id).await?;
        load_board_in_group(&self.group_repo, &board_id, &group_id).await?;
        load_confirmed_member(&self.group_repo, &group_id, &user_id).await?;

        let comment = GroupComment::new(board_id, user_id, request.comment);
        let comment = self.group_repo.insert_comment(comment).await?;
        Ok(GroupCommentResponse::from(comment))
    }

    /// 댓글 수정 (작성자 전용)
    pub async fn update(&self, user_id: &str, group_id: &str, request: UpdateCommentRequest) -> Result<GroupCommentResponse, AppError> {
        request.validate()?;
        let user_id = parse_object_id(user_id)?;
        let group_id = parse_object_id(group_id)?;
        let comment_id = parse_object_id(&request.comment_id)?;

        load_active_group(&self.group_repo, &group_id).await?;
        let mut comment = self.load_own_comment(&user_id, &group_id, &comment_id).await?;

        comment.comment = request.comment;
        comment.modified_at = Some(DateTime::now());
        self.group_repo.update_comment(&comment).await?;

        Ok(GroupCommentResponse::from(comment))
    }

    /// 댓글 삭제 (작성자 전용)
    pub async fn delete(&self, user_id: &str, group_id: &str, comment_id: &str) -> Result<(), AppError> {
        let user_id = parse_object_id(user_id)?;
        let group_id = parse_object_id(group_id)?;
        let comment_id = parse_object_id(comment_id)?;

        load_active_group(&self.group_repo, &group_id).await?;
        self.load_own_comment(&user_id, &group_id, &comment_id).await?;
        self.group_repo.delete_comment(&comment_id).await?;
        Ok(())
    }

    /// 그룹의 게시판에 달린 댓글만 반환합니다. 없으면 None.
    pub async fn find_by_id(&self, group_id: &str, comment_id: &str) -> Result<Option<GroupCommentResponse>, AppError> {
        let group_id = parse_object_id(group_id)?;
        let comment_id = parse_object_id(comment_id)?;

        let Some(comment) = self.group_repo.find_comment(&comment_id).await? else {
            return Ok(None);
        };
        let on_group_board = self.group_repo
            .find_board(&comment.group_board_id)
            .await?
            .is_some_and(|board| board.is_available(&group_id));

        Ok(on_group_board.then(|| GroupCommentResponse::from(comment)))
    }

    pub async fn find_board_comments(&self, group_id: &str, board_id: &str) -> Result<Vec<GroupCommentResponse>, AppError> {
        let group_id = parse_object_id(group_id)?;
        let board_id = parse_object_id(board_id)?;

        load_board_in_group(&self.group_repo, &board_id, &group_id).await?;
        let comments = self.group_repo.find_board_comments(&board_id).await?;
        Ok(comments.into_iter().map(GroupCommentResponse::from).collect())
    }
}
