//! User Entity Implementation
//!
//! 사용자 계정과 그에 딸린 집합 값(역할, 클레임, 외부 로그인, 친구,
//! 상품 설명)을 하나의 MongoDB 문서로 표현합니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::config::AuthProvider;

/// 신규 가입자에게 부여되는 기본 역할
pub const DEFAULT_ROLE: &str = "user";
/// 관리자 역할
pub const ADMIN_ROLE: &str = "admin";

/// 사용자 엔티티
///
/// 집합 값 필드는 리포지토리에서 `$addToSet`/`$pull`로 원자적으로 갱신됩니다.
/// 친구 관계는 단방향입니다. A가 B를 추가해도 B의 목록은 바뀌지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 사용자 이메일 (unique)
    pub email: String,
    /// 사용자 이름 (unique)
    pub username: String,
    /// bcrypt 해시
    pub password_hash: String,
    pub email_confirmed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// 역할 이름 목록
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub claims: Vec<UserClaim>,
    #[serde(default)]
    pub logins: Vec<UserLogin>,
    #[serde(default)]
    pub friend_ids: Vec<ObjectId>,
    #[serde(default)]
    pub product_descriptions: Vec<UserProductDescription>,
    pub created_at: DateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime>,
}

/// 사용자 클레임 (타입/값 쌍)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserClaim {
    pub claim_type: String,
    pub claim_value: String,
}

/// 사용자에게 연결된 외부 로그인 기록
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserLogin {
    pub login_provider: AuthProvider,
    pub provider_key: String,
}

/// 사용자가 남긴 상품 평점과 설명
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProductDescription {
    pub product_id: ObjectId,
    /// 1..=5
    pub rating: u8,
    pub description: String,
    pub created_at: DateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime>,
}

impl User {
    /// 기본 역할을 가진 새 로컬 사용자를 만듭니다.
    pub fn new(email: String, username: String, password_hash: String) -> Self {
        Self {
            id: None,
            email,
            username,
            password_hash,
            email_confirmed: false,
            phone_number: None,
            roles: vec![DEFAULT_ROLE.to_string()],
            claims: Vec::new(),
            logins: Vec::new(),
            friend_ids: Vec::new(),
            product_descriptions: Vec::new(),
            created_at: DateTime::now(),
            modified_at: None,
        }
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.map(|id| id.to_hex())
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn product_description(&self, product_id: &ObjectId) -> Option<&UserProductDescription> {
        self.product_descriptions
            .iter()
            .find(|description| &description.product_id == product_id)
    }
}

impl UserProductDescription {
    pub fn new(product_id: ObjectId, rating: u8, description: String) -> Self {
        Self {
            product_id,
            rating,
            description,
            created_at: DateTime::now(),
            modified_at: None,
        }
    }
}
