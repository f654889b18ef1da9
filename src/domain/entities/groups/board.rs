use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 그룹 게시판 (소프트 삭제)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupBoard {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub group_id: ObjectId,
    pub creator_id: ObjectId,
    pub name: String,
    pub information: String,
    pub is_not_deleted: bool,
    pub created_at: DateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime>,
}

impl GroupBoard {
    pub fn new(group_id: ObjectId, creator_id: ObjectId, name: String, information: String) -> Self {
        Self {
            id: None,
            group_id,
            creator_id,
            name,
            information,
            is_not_deleted: true,
            created_at: DateTime::now(),
            modified_at: None,
            deleted_at: None,
        }
    }

    /// 삭제되지 않았고 해당 그룹에 속한 게시판인지
    pub fn is_available(&self, group_id: &ObjectId) -> bool {
        self.is_not_deleted && &self.group_id == group_id
    }

    pub fn soft_delete(&mut self) {
        let now = DateTime::now();
        self.is_not_deleted = false;
        self.deleted_at = Some(now);
        self.modified_at = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_availability() {
        let group_id = ObjectId::new();
        let mut board = GroupBoard::new(group_id, ObjectId::new(), "Recipes".into(), "".into());

        assert!(board.is_available(&group_id));
        assert!(!board.is_available(&ObjectId::new()));

        board.soft_delete();
        assert!(!board.is_available(&group_id));
        assert!(board.deleted_at.is_some());
    }
}
