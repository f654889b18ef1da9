use serde::{Deserialize, Serialize};

use crate::domain::dto::{format_datetime, format_optional_datetime, id_hex};
use crate::domain::entities::users::{Role, User, UserClaim, UserLogin, UserProductDescription};
use crate::domain::models::token::token::TokenPair;

/// 사용자 응답 DTO (비밀번호 해시 제외)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub username: String,
    pub email_confirmed: bool,
    pub phone_number: Option<String>,
    pub roles: Vec<String>,
    pub claims: Vec<UserClaim>,
    pub logins: Vec<UserLogin>,
    pub friend_ids: Vec<String>,
    pub created_at: String,
    pub modified_at: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let User {
            id,
            email,
            username,
            email_confirmed,
            phone_number,
            roles,
            claims,
            logins,
            friend_ids,
            created_at,
            modified_at,
            ..
        } = user;

        Self {
            id: id_hex(id),
            email,
            username,
            email_confirmed,
            phone_number,
            roles,
            claims,
            logins,
            friend_ids: friend_ids.iter().map(|id| id.to_hex()).collect(),
            created_at: format_datetime(created_at),
            modified_at: format_optional_datetime(modified_at),
        }
    }
}

/// 친구 목록 항목
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendResponse {
    pub id: String,
    pub username: String,
}

impl From<User> for FriendResponse {
    fn from(user: User) -> Self {
        Self {
            id: id_hex(user.id),
            username: user.username,
        }
    }
}

/// 사용자 상품 평점/설명
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDescriptionResponse {
    pub product_id: String,
    pub rating: u8,
    pub description: String,
    pub created_at: String,
    pub modified_at: Option<String>,
}

impl From<UserProductDescription> for ProductDescriptionResponse {
    fn from(description: UserProductDescription) -> Self {
        Self {
            product_id: description.product_id.to_hex(),
            rating: description.rating,
            description: description.description,
            created_at: format_datetime(description.created_at),
            modified_at: format_optional_datetime(description.modified_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleResponse {
    pub id: String,
    pub name: String,
    pub created_at: String,
}

impl From<Role> for RoleResponse {
    fn from(role: Role) -> Self {
        Self {
            id: id_hex(role.id),
            name: role.name,
            created_at: format_datetime(role.created_at),
        }
    }
}

/// 로그인/갱신 응답 DTO (JWT 토큰 포함)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl LoginResponse {
    pub fn new(user: User, tokens: TokenPair) -> Self {
        Self {
            user: UserResponse::from(user),
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            token_type: tokens.token_type,
            expires_in: tokens.expires_in,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn test_user_response_hides_password_hash() {
        let mut user = User::new("anna@example.com".into(), "anna".into(), "$2b$04$secret".into());
        user.id = Some(ObjectId::new());
        user.friend_ids.push(ObjectId::new());

        let json = serde_json::to_value(UserResponse::from(user.clone())).unwrap();

        assert_eq!(json["id"], user.id.unwrap().to_hex());
        assert_eq!(json["friend_ids"][0], user.friend_ids[0].to_hex());
        assert!(json.get("password_hash").is_none());
        assert!(json["created_at"].as_str().unwrap().contains('T'));
    }
}
