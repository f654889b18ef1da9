//! # 토큰 및 로그인 설정
//!
//! JWT 서명 키와 토큰 수명, 사용자에게 연결되는 외부 로그인 프로바이더를 정의합니다.
//!
//! ```bash
//! export JWT_SECRET="change-me"
//! export JWT_EXPIRATION_HOURS="24"        # 액세스 토큰
//! export JWT_REFRESH_EXPIRATION_DAYS="7"  # 리프레시 토큰
//! ```
//!
//! ```rust,ignore
//! use crate::config::JwtConfig;
//!
//! let exp = now + JwtConfig::access_ttl();
//! ```

use std::env;

use chrono::Duration;
use once_cell::sync::Lazy;

use super::data_config::{env_or, Environment};
use crate::errors::errors::AppError;

const DEV_SECRET: &str = "waste-products-dev-secret";

/// 첫 사용 시 한 번만 읽습니다. 개발용 키로 대체될 때의 경고도 한 번만 남습니다.
static SECRET: Lazy<String> = Lazy::new(|| {
    configured_secret().unwrap_or_else(|| {
        log::warn!("JWT_SECRET not set, signing tokens with the development key");
        DEV_SECRET.to_string()
    })
});

fn configured_secret() -> Option<String> {
    env::var("JWT_SECRET").ok().filter(|secret| !secret.trim().is_empty())
}

pub struct JwtConfig;

impl JwtConfig {
    /// HS256 서명 키. 설정이 없으면 개발용 키입니다.
    ///
    /// 프로덕션에서는 [`JwtConfig::validate`]가 시작 단계에서 개발용 키 사용을 막습니다.
    pub fn secret() -> &'static str {
        SECRET.as_str()
    }

    /// 현재 환경에서 서명 키 설정이 충분한지 확인합니다. 서버 시작 시 호출합니다.
    pub fn validate() -> Result<(), AppError> {
        Self::validate_for(&Environment::current(), configured_secret().as_deref())
    }

    /// 프로덕션은 `JWT_SECRET`이 반드시 있어야 합니다.
    pub fn validate_for(environment: &Environment, secret: Option<&str>) -> Result<(), AppError> {
        match (environment, secret) {
            (Environment::Production, None) => Err(AppError::InternalError(
                "JWT_SECRET must be set in production".to_string(),
            )),
            _ => Ok(()),
        }
    }

    pub fn access_ttl() -> Duration {
        Duration::hours(env_or("JWT_EXPIRATION_HOURS", 24))
    }

    pub fn refresh_ttl() -> Duration {
        Duration::days(env_or("JWT_REFRESH_EXPIRATION_DAYS", 7))
    }
}

/// `UserLogin` 기록의 출처
///
/// 이 서버는 외부 프로바이더와 직접 통신하지 않습니다. 관리 화면에서
/// 연결한 계정을 기록해 두는 용도이며 JSON에서는 소문자 이름을 씁니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    Local,
    Google,
    GitHub,
    Facebook,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_names_are_lowercase() {
        assert_eq!(serde_json::to_string(&AuthProvider::GitHub).unwrap(), "\"github\"");
        assert_eq!(serde_json::to_string(&AuthProvider::Local).unwrap(), "\"local\"");

        let parsed: AuthProvider = serde_json::from_str("\"facebook\"").unwrap();
        assert_eq!(parsed, AuthProvider::Facebook);
        assert!(serde_json::from_str::<AuthProvider>("\"twitter\"").is_err());
    }

    #[test]
    fn test_production_requires_configured_secret() {
        let result = JwtConfig::validate_for(&Environment::Production, None);
        assert!(matches!(result, Err(AppError::InternalError(msg)) if msg.contains("JWT_SECRET")));

        assert!(JwtConfig::validate_for(&Environment::Production, Some("s3cret")).is_ok());
        assert!(JwtConfig::validate_for(&Environment::Development, None).is_ok());
        assert!(JwtConfig::validate_for(&Environment::Staging, None).is_ok());
    }

    #[test]
    fn test_secret_is_read_once() {
        let first = JwtConfig::secret();
        let second = JwtConfig::secret();
        assert!(std::ptr::eq(first, second));
        assert!(!first.is_empty());
    }

    #[test]
    fn test_token_lifetimes_default() {
        if env::var("JWT_EXPIRATION_HOURS").is_err() {
            assert_eq!(JwtConfig::access_ttl(), Duration::hours(24));
        }
        if env::var("JWT_REFRESH_EXPIRATION_DAYS").is_err() {
            assert_eq!(JwtConfig::refresh_ttl(), Duration::days(7));
        }
    }
}
