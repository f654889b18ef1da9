use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 그룹 멤버십
///
/// 초대로 생성되며(`is_confirmed = false`), 초대받은 사용자가 수락하면 확정됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupUser {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub group_id: ObjectId,
    pub user_id: ObjectId,
    pub right_to_create_boards: bool,
    pub is_confirmed: bool,
    pub created_at: DateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime>,
}

impl GroupUser {
    /// 수락 대기 중인 초대
    pub fn invitation(group_id: ObjectId, user_id: ObjectId) -> Self {
        Self {
            id: None,
            group_id,
            user_id,
            right_to_create_boards: false,
            is_confirmed: false,
            created_at: DateTime::now(),
            modified_at: None,
        }
    }

    /// 그룹 관리자의 멤버십 (확정, 게시판 생성 권한 보유)
    pub fn admin(group_id: ObjectId, user_id: ObjectId) -> Self {
        Self {
            right_to_create_boards: true,
            is_confirmed: true,
            ..Self::invitation(group_id, user_id)
        }
    }

    pub fn can_create_boards(&self) -> bool {
        self.is_confirmed && self.right_to_create_boards
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_rights_require_confirmation() {
        let mut member = GroupUser::invitation(ObjectId::new(), ObjectId::new());
        member.right_to_create_boards = true;
        assert!(!member.can_create_boards());

        member.is_confirmed = true;
        assert!(member.can_create_boards());
    }

    #[test]
    fn test_admin_membership_is_confirmed_with_rights() {
        let admin = GroupUser::admin(ObjectId::new(), ObjectId::new());
        assert!(admin.is_confirmed);
        assert!(admin.can_create_boards());
    }
}
