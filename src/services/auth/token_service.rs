//! JWT 토큰 관리 서비스 구현
//!
//! JSON Web Token 기반의 인증 시스템을 제공합니다.
//! 액세스 토큰과 리프레시 토큰의 생성과 검증을 담당합니다.
//! 리프레시 토큰으로 새 토큰 쌍을 받는 흐름은 사용자의 현재 역할을 다시 읽어야 하므로
//! [`UserService::refresh`](crate::services::users::UserService::refresh)가 이 서비스를 조합해 처리합니다.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use singleton_macro::service;

use crate::config::JwtConfig;
use crate::domain::entities::users::User;
use crate::domain::models::token::token::{TokenClaims, TokenKind, TokenPair};
use crate::errors::errors::AppError;

/// JWT 토큰 관리 서비스
///
/// HMAC-SHA256 서명을 사용하여 JWT 토큰을 생성하고 검증합니다.
/// 토큰 종류(`kind`)가 클레임에 들어가므로 리프레시 토큰으로는 API를 호출할 수 없습니다.
#[service(name = "token")]
pub struct TokenService {
    // 외부 의존성 없음
}

impl TokenService {
    fn issue(&self, user: &User, kind: TokenKind, lifetime: Duration) -> Result<String, AppError> {
        let now = Utc::now();
        let expiration = now + lifetime;

        let claims = TokenClaims {
            sub: user.id_string().ok_or_else(|| {
                AppError::InternalError("사용자 ID가 없습니다".to_string())
            })?,
            roles: user.roles.clone(),
            kind,
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        let secret = JwtConfig::secret();
        let encoding_key = EncodingKey::from_secret(secret.as_bytes());

        encode(&Header::default(), &claims, &encoding_key)
            .map_err(|e| AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e)))
    }

    /// 사용자를 위한 JWT 액세스 토큰 생성
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 토큰 생성 실패 또는 사용자 ID 없음
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let token_service = TokenService::instance();
    /// let access_token = token_service.generate_access_token(&user)?;
    /// ```
    pub fn generate_access_token(&self, user: &User) -> Result<String, AppError> {
        self.issue(user, TokenKind::Access, JwtConfig::access_ttl())
    }

    /// 사용자를 위한 리프레시 토큰 생성
    pub fn generate_refresh_token(&self, user: &User) -> Result<String, AppError> {
        self.issue(user, TokenKind::Refresh, JwtConfig::refresh_ttl())
    }

    /// 토큰 쌍 생성 (액세스 + 리프레시)
    ///
    /// ```rust,ignore
    /// let token_pair = token_service.generate_token_pair(&user)?;
    /// println!("Expires in: {} seconds", token_pair.expires_in);
    /// ```
    pub fn generate_token_pair(&self, user: &User) -> Result<TokenPair, AppError> {
        Ok(TokenPair {
            access_token: self.generate_access_token(user)?,
            refresh_token: self.generate_refresh_token(user)?,
            token_type: "Bearer".to_string(),
            expires_in: JwtConfig::access_ttl().num_seconds(),
        })
    }

    /// JWT 토큰 검증 및 클레임 추출
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 토큰 만료, 잘못된 형식/서명
    pub fn verify_token(&self, token: &str) -> Result<TokenClaims, AppError> {
        let secret = JwtConfig::secret();
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());
        let validation = Validation::default();

        decode::<TokenClaims>(token, &decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::AuthenticationError("토큰이 만료되었습니다".to_string())
                }
                _ => AppError::AuthenticationError(format!("유효하지 않은 토큰입니다: {}", e)),
            })
    }

    /// 액세스 토큰만 허용하는 검증. 미들웨어에서 사용합니다.
    pub fn verify_access_token(&self, token: &str) -> Result<TokenClaims, AppError> {
        let claims = self.verify_token(token)?;
        if claims.kind != TokenKind::Access {
            return Err(AppError::AuthenticationError("액세스 토큰이 아닙니다".to_string()));
        }
        Ok(claims)
    }

    /// 리프레시 토큰만 허용하는 검증
    pub fn verify_refresh_token(&self, token: &str) -> Result<TokenClaims, AppError> {
        let claims = self.verify_token(token)?;
        if claims.kind != TokenKind::Refresh {
            return Err(AppError::AuthenticationError("리프레시 토큰이 아닙니다".to_string()));
        }
        Ok(claims)
    }

    /// Bearer 토큰에서 실제 토큰 부분 추출
    ///
    /// ```rust,ignore
    /// let auth_header = "Bearer eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...";
    /// let token = token_service.extract_bearer_token(auth_header)?;
    /// let claims = token_service.verify_token(token)?;
    /// ```
    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> Result<&'a str, AppError> {
        match auth_header.strip_prefix("Bearer ") {
            Some(token) if !token.trim().is_empty() => Ok(token.trim()),
            _ => Err(AppError::AuthenticationError("유효하지 않은 인증 헤더 형식입니다".to_string())),
        }
    }
}

impl Default for TokenService {
    fn default() -> Self {
        Self::new()
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    fn user() -> User {
        let mut user = User::new("anna@example.com".to_string(), "anna".to_string(), "hash".to_string());
        user.id = Some(ObjectId::new());
        user
    }

    #[test]
    fn test_access_token_round_trip() {
        let service = TokenService::instance();
        let user = user();

        let token = service.generate_access_token(&user).unwrap();
        let claims = service.verify_access_token(&token).unwrap();

        assert_eq!(Some(claims.sub), user.id_string());
        assert_eq!(claims.roles, vec!["user".to_string()]);
        assert_eq!(claims.kind, TokenKind::Access);
    }

    #[test]
    fn test_refresh_token_is_not_an_access_token() {
        let service = TokenService::instance();
        let pair = service.generate_token_pair(&user()).unwrap();

        assert!(matches!(
            service.verify_access_token(&pair.refresh_token),
            Err(AppError::AuthenticationError(_))
        ));
        assert!(service.verify_refresh_token(&pair.refresh_token).is_ok());
        assert!(service.verify_refresh_token(&pair.access_token).is_err());
        assert_eq!(pair.token_type, "Bearer");
    }

    #[test]
    fn test_user_without_id_cannot_get_token() {
        let service = TokenService::instance();
        let mut user = user();
        user.id = None;

        assert!(matches!(service.generate_access_token(&user), Err(AppError::InternalError(_))));
    }

    #[test]
    fn test_garbage_token_is_authentication_error() {
        let service = TokenService::instance();
        assert!(matches!(service.verify_token("not.a.jwt"), Err(AppError::AuthenticationError(_))));
    }

    #[test]
    fn test_extract_bearer_token() {
        let service = TokenService::instance();
        assert_eq!(service.extract_bearer_token("Bearer abc.def").unwrap(), "abc.def");
        assert!(service.extract_bearer_token("Basic abc").is_err());
        assert!(service.extract_bearer_token("Bearer   ").is_err());
    }
}
