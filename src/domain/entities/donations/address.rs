use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// 기부자 주소
///
/// 여러 기부자가 같은 주소 문서를 공유할 수 있습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
    pub is_confirmed: bool,
}

impl Address {
    /// id를 제외한 모든 필드가 같은지 비교합니다.
    pub fn same_as(&self, other: &Address) -> bool {
        self.name == other.name
            && self.street == other.street
            && self.city == other.city
            && self.state == other.state
            && self.zip == other.zip
            && self.country == other.country
            && self.is_confirmed == other.is_confirmed
    }
}
