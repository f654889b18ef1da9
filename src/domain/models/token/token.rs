//! JWT 클레임과 발급된 토큰 쌍
use serde::{Deserialize, Serialize};

/// 토큰 용도
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT 토큰의 클레임(Payload) 구조체
///
/// - `sub`: 사용자 ID (ObjectId hex)
/// - `roles`: 발급 시점의 역할 목록
/// - `kind`: access / refresh 구분. refresh 토큰으로 API를 호출할 수 없습니다.
/// - `iat`, `exp`: Unix timestamp
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub roles: Vec<String>,
    pub kind: TokenKind,
    pub iat: i64,
    pub exp: i64,
}

/// 클라이언트에게 전달되는 토큰 쌍
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// 액세스 토큰 만료까지 남은 시간 (초)
    pub expires_in: i64,
}
