//! `/api/auth` 요청 본문

use serde::Deserialize;
use validator::Validate;

/// `POST /api/auth/login`
///
/// 이메일은 저장 시와 같이 소문자로 비교되므로 대소문자를 가리지 않습니다.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "이메일 형식이 아닙니다"))]
    pub email: String,

    #[validate(length(min = 1, message = "비밀번호가 비어 있습니다"))]
    pub password: String,
}

/// `POST /api/auth/refresh`
///
/// 로그인 응답의 `refresh_token`만 받습니다. 액세스 토큰을 넣으면 401입니다.
#[derive(Debug, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "refresh_token이 비어 있습니다"))]
    pub refresh_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_requires_email_shape() {
        let bad = LoginRequest { email: "not-an-email".into(), password: "secret".into() };
        let good = LoginRequest { email: "ann@waste.dev".into(), password: "secret".into() };

        assert!(bad.validate().is_err());
        assert!(good.validate().is_ok());
    }

    #[test]
    fn test_refresh_request_rejects_empty_token() {
        let request: RefreshTokenRequest = serde_json::from_str(r#"{"refresh_token":""}"#).unwrap();
        assert!(request.validate().is_err());
    }
}
