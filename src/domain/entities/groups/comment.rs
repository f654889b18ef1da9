use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 게시판 댓글
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupComment {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub group_board_id: ObjectId,
    pub commentator_id: ObjectId,
    pub comment: String,
    pub created_at: DateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime>,
}

impl GroupComment {
    pub fn new(group_board_id: ObjectId, commentator_id: ObjectId, comment: String) -> Self {
        Self {
            id: None,
            group_board_id,
            commentator_id,
            comment,
            created_at: DateTime::now(),
            modified_at: None,
        }
    }
}
