use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 사용자 그룹
///
/// 삭제는 소프트 삭제입니다 (`is_not_deleted = false`, `deleted_at` 기록).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub information: String,
    pub admin_id: ObjectId,
    pub is_not_deleted: bool,
    pub created_at: DateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime>,
}

impl Group {
    pub fn new(admin_id: ObjectId, name: String, information: String) -> Self {
        Self {
            id: None,
            name,
            information,
            admin_id,
            is_not_deleted: true,
            created_at: DateTime::now(),
            modified_at: None,
            deleted_at: None,
        }
    }

    pub fn is_owned_by(&self, user_id: &ObjectId) -> bool {
        &self.admin_id == user_id
    }

    pub fn soft_delete(&mut self) {
        let now = DateTime::now();
        self.is_not_deleted = false;
        self.deleted_at = Some(now);
        self.modified_at = Some(now);
    }
}
