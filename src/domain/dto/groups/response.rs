use serde::{Deserialize, Serialize};

use crate::domain::dto::{format_datetime, format_optional_datetime, id_hex};
use crate::domain::entities::groups::{Group, GroupBoard, GroupComment, GroupProduct, GroupUser};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupResponse {
    pub id: String,
    pub name: String,
    pub information: String,
    pub admin_id: String,
    pub created_at: String,
    pub modified_at: Option<String>,
}

impl From<Group> for GroupResponse {
    fn from(group: Group) -> Self {
        Self {
            id: id_hex(group.id),
            name: group.name,
            information: group.information,
            admin_id: group.admin_id.to_hex(),
            created_at: format_datetime(group.created_at),
            modified_at: format_optional_datetime(group.modified_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupUserResponse {
    pub id: String,
    pub group_id: String,
    pub user_id: String,
    pub right_to_create_boards: bool,
    pub is_confirmed: bool,
    pub created_at: String,
}

impl From<GroupUser> for GroupUserResponse {
    fn from(member: GroupUser) -> Self {
        Self {
            id: id_hex(member.id),
            group_id: member.group_id.to_hex(),
            user_id: member.user_id.to_hex(),
            right_to_create_boards: member.right_to_create_boards,
            is_confirmed: member.is_confirmed,
            created_at: format_datetime(member.created_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupBoardResponse {
    pub id: String,
    pub group_id: String,
    pub creator_id: String,
    pub name: String,
    pub information: String,
    pub created_at: String,
    pub modified_at: Option<String>,
}

impl From<GroupBoard> for GroupBoardResponse {
    fn from(board: GroupBoard) -> Self {
        Self {
            id: id_hex(board.id),
            group_id: board.group_id.to_hex(),
            creator_id: board.creator_id.to_hex(),
            name: board.name,
            information: board.information,
            created_at: format_datetime(board.created_at),
            modified_at: format_optional_datetime(board.modified_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupCommentResponse {
    pub id: String,
    pub board_id: String,
    pub commentator_id: String,
    pub comment: String,
    pub created_at: String,
    pub modified_at: Option<String>,
}

impl From<GroupComment> for GroupCommentResponse {
    fn from(comment: GroupComment) -> Self {
        Self {
            id: id_hex(comment.id),
            board_id: comment.group_board_id.to_hex(),
            commentator_id: comment.commentator_id.to_hex(),
            comment: comment.comment,
            created_at: format_datetime(comment.created_at),
            modified_at: format_optional_datetime(comment.modified_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupProductResponse {
    pub id: String,
    pub board_id: String,
    pub product_id: String,
    pub information: String,
    pub created_at: String,
    pub modified_at: Option<String>,
}

impl From<GroupProduct> for GroupProductResponse {
    fn from(product: GroupProduct) -> Self {
        Self {
            id: id_hex(product.id),
            board_id: product.group_board_id.to_hex(),
            product_id: product.product_id.to_hex(),
            information: product.information,
            created_at: format_datetime(product.created_at),
            modified_at: format_optional_datetime(product.modified_at),
        }
    }
}
