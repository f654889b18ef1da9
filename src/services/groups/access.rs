//! 그룹 접근 규칙
//!
//! 그룹 관련 서비스들이 공통으로 사용하는 권한 검사입니다. 순수 함수는 엔티티만
//! 보고 판단하고, `load_*` 함수는 리포지토리에서 대상을 읽은 뒤 같은 규칙을 적용합니다.

use mongodb::bson::oid::ObjectId;

use crate::domain::entities::groups::{Group, GroupBoard, GroupComment, GroupProduct, GroupUser};
use crate::errors::errors::AppError;
use crate::repositories::groups::GroupRepository;

pub fn group_not_found(id: &ObjectId) -> AppError {
    AppError::NotFound(format!("그룹을 찾을 수 없습니다: {}", id))
}

pub fn board_not_found(id: &ObjectId) -> AppError {
    AppError::NotFound(format!("게시판을 찾을 수 없습니다: {}", id))
}

/// 그룹 관리자만 허용
pub fn ensure_admin(group: &Group, user_id: &ObjectId) -> Result<(), AppError> {
    if group.is_owned_by(user_id) {
        Ok(())
    } else {
        Err(AppError::AuthorizationError("그룹 관리자만 할 수 있는 작업입니다".to_string()))
    }
}

/// 확정된 멤버만 허용
pub fn ensure_confirmed(member: Option<&GroupUser>) -> Result<(), AppError> {
    match member {
        Some(member) if member.is_confirmed => Ok(()),
        _ => Err(AppError::AuthorizationError("그룹 멤버가 아닙니다".to_string())),
    }
}

/// 게시판 생성 권한이 있는 확정 멤버만 허용
pub fn ensure_can_create_boards(member: Option<&GroupUser>) -> Result<(), AppError> {
    ensure_confirmed(member)?;
    match member {
        Some(member) if member.can_create_boards() => Ok(()),
        _ => Err(AppError::AuthorizationError("게시판을 만들 권한이 없습니다".to_string())),
    }
}

/// 게시판 삭제는 작성자 또는 그룹 관리자만 허용
pub fn ensure_board_deletable(group: &Group, board: &GroupBoard, user_id: &ObjectId) -> Result<(), AppError> {
    if &board.creator_id == user_id || group.is_owned_by(user_id) {
        Ok(())
    } else {
        Err(AppError::AuthorizationError("게시판 작성자나 그룹 관리자만 삭제할 수 있습니다".to_string()))
    }
}

/// 게시판 변경은 작성자만 허용
pub fn ensure_board_author(board: &GroupBoard, user_id: &ObjectId) -> Result<(), AppError> {
    if &board.creator_id == user_id {
        Ok(())
    } else {
        Err(AppError::AuthorizationError("게시판 작성자만 변경할 수 있습니다".to_string()))
    }
}

/// 댓글 수정/삭제는 작성자만 허용
pub fn ensure_comment_author(comment: &GroupComment, user_id: &ObjectId) -> Result<(), AppError> {
    if &comment.commentator_id == user_id {
        Ok(())
    } else {
        Err(AppError::AuthorizationError("댓글 작성자만 할 수 있는 작업입니다".to_string()))
    }
}

/// 게시판 상품은 요청한 게시판에 올라와 있어야 합니다. 다른 게시판의 상품은 없는 것으로 봅니다.
pub fn ensure_on_board(product: &GroupProduct, board_id: &ObjectId) -> Result<(), AppError> {
    if &product.group_board_id == board_id {
        Ok(())
    } else {
        Err(AppError::NotFound(format!("게시판 상품을 찾을 수 없습니다: {}", product.id.map(|id| id.to_hex()).unwrap_or_default())))
    }
}

/// 수락 대기 중인 초대만 수락/거절할 수 있습니다.
pub fn pending_invitation(member: Option<GroupUser>) -> Result<GroupUser, AppError> {
    member
        .filter(|member| !member.is_confirmed)
        .ok_or_else(|| AppError::NotFound("초대를 찾을 수 없습니다".to_string()))
}

/// 관리자는 자신의 그룹을 떠나거나 제거될 수 없습니다.
pub fn ensure_not_admin(group: &Group, user_id: &ObjectId) -> Result<(), AppError> {
    if group.is_owned_by(user_id) {
        Err(AppError::ValidationError("관리자는 그룹에서 나가거나 제거될 수 없습니다".to_string()))
    } else {
        Ok(())
    }
}

/// 삭제되지 않은 그룹을 읽습니다.
pub async fn load_active_group(repo: &GroupRepository, group_id: &ObjectId) -> Result<Group, AppError> {
    repo.find_group(group_id)
        .await?
        .filter(|group| group.is_not_deleted)
        .ok_or_else(|| group_not_found(group_id))
}

/// 그룹에 속한 활성 게시판을 읽습니다.
pub async fn load_board_in_group(
    repo: &GroupRepository,
    board_id: &ObjectId,
    group_id: &ObjectId,
) -> Result<GroupBoard, AppError> {
    repo.find_board(board_id)
        .await?
        .filter(|board| board.is_available(group_id))
        .ok_or_else(|| board_not_found(board_id))
}

/// 확정 멤버십을 읽습니다.
pub async fn load_confirmed_member(
    repo: &GroupRepository,
    group_id: &ObjectId,
    user_id: &ObjectId,
) -> Result<GroupUser, AppError> {
    let member = repo.find_member(group_id, user_id).await?;
    ensure_confirmed(member.as_ref())?;
    member.ok_or_else(|| AppError::AuthorizationError("그룹 멤버가 아닙니다".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_admin_passes_admin_check() {
        let admin = ObjectId::new();
        let group = Group::new(admin, "Zero waste".into(), "".into());

        assert!(ensure_admin(&group, &admin).is_ok());
        assert!(matches!(ensure_admin(&group, &ObjectId::new()), Err(AppError::AuthorizationError(_))));
    }

    #[test]
    fn test_unconfirmed_member_is_rejected() {
        let invitation = GroupUser::invitation(ObjectId::new(), ObjectId::new());

        assert!(ensure_confirmed(None).is_err());
        assert!(ensure_confirmed(Some(&invitation)).is_err());
    }

    #[test]
    fn test_board_rights() {
        let group_id = ObjectId::new();
        let admin = GroupUser::admin(group_id, ObjectId::new());
        let mut member = GroupUser::invitation(group_id, ObjectId::new());
        member.is_confirmed = true;

        assert!(ensure_can_create_boards(Some(&admin)).is_ok());
        assert!(ensure_can_create_boards(Some(&member)).is_err());

        member.right_to_create_boards = true;
        assert!(ensure_can_create_boards(Some(&member)).is_ok());
    }

    #[test]
    fn test_board_deletion_by_creator_or_admin() {
        let admin = ObjectId::new();
        let creator = ObjectId::new();
        let group = Group::new(admin, "Zero waste".into(), "".into());
        let board = GroupBoard::new(ObjectId::new(), creator, "Recipes".into(), "".into());

        assert!(ensure_board_deletable(&group, &board, &creator).is_ok());
        assert!(ensure_board_deletable(&group, &board, &admin).is_ok());
        assert!(ensure_board_deletable(&group, &board, &ObjectId::new()).is_err());
    }

    #[test]
    fn test_board_update_is_creator_only() {
        let admin = ObjectId::new();
        let creator = ObjectId::new();
        let board = GroupBoard::new(ObjectId::new(), creator, "Recipes".into(), "".into());

        assert!(ensure_board_author(&board, &creator).is_ok());
        assert!(matches!(ensure_board_author(&board, &admin), Err(AppError::AuthorizationError(_))));
    }

    #[test]
    fn test_comment_changes_are_author_only() {
        let author = ObjectId::new();
        let comment = GroupComment::new(ObjectId::new(), author, "Bring jars".into());

        assert!(ensure_comment_author(&comment, &author).is_ok());
        assert!(matches!(ensure_comment_author(&comment, &ObjectId::new()), Err(AppError::AuthorizationError(_))));
    }

    #[test]
    fn test_group_product_must_be_on_requested_board() {
        let board_id = ObjectId::new();
        let product = GroupProduct::new(board_id, ObjectId::new(), "Glass jars".into());

        assert!(ensure_on_board(&product, &board_id).is_ok());
        assert!(matches!(ensure_on_board(&product, &ObjectId::new()), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_only_unconfirmed_membership_is_a_pending_invitation() {
        let invitation = GroupUser::invitation(ObjectId::new(), ObjectId::new());
        let confirmed = GroupUser::admin(ObjectId::new(), ObjectId::new());

        assert_eq!(pending_invitation(Some(invitation.clone())).unwrap(), invitation);
        assert!(matches!(pending_invitation(Some(confirmed)), Err(AppError::NotFound(_))));
        assert!(matches!(pending_invitation(None), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_admin_cannot_be_removed() {
        let admin = ObjectId::new();
        let group = Group::new(admin, "Zero waste".into(), "".into());

        assert!(matches!(ensure_not_admin(&group, &admin), Err(AppError::ValidationError(_))));
        assert!(ensure_not_admin(&group, &ObjectId::new()).is_ok());
    }
}
