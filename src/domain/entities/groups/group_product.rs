use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 게시판에 공유된 카탈로그 상품
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupProduct {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub group_board_id: ObjectId,
    pub product_id: ObjectId,
    pub information: String,
    pub created_at: DateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime>,
}

impl GroupProduct {
    pub fn new(group_board_id: ObjectId, product_id: ObjectId, information: String) -> Self {
        Self {
            id: None,
            group_board_id,
            product_id,
            information,
            created_at: DateTime::now(),
            modified_at: None,
        }
    }
}
