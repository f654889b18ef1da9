use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::utils::string_utils::normalize_key;

/// 역할 엔티티
///
/// 사용자 문서는 역할을 이름으로 참조하므로, 이름 변경과 삭제는
/// 모든 사용자 문서에 함께 반영됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub name_key: String,
    pub created_at: DateTime,
}

impl Role {
    pub fn new(name: &str) -> Self {
        let name = name.trim().to_string();
        Self {
            id: None,
            name_key: normalize_key(&name),
            name,
            created_at: DateTime::now(),
        }
    }
}
