use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::utils::string_utils::normalize_key;

/// 상품 카테고리
///
/// 이름은 대소문자 구분 없이 유일하며, 이를 위해 `name_key`에
/// 정규화된 이름을 함께 저장합니다 (unique 인덱스).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub name_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime>,
}

impl Category {
    pub fn new(name: &str) -> Self {
        let name = name.trim().to_string();
        Self {
            id: None,
            name_key: normalize_key(&name),
            name,
            description: None,
            created_at: DateTime::now(),
            modified_at: None,
        }
    }

    pub fn id_hex(&self) -> String {
        self.id.map(|id| id.to_hex()).unwrap_or_default()
    }
}
