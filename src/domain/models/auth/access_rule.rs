//! 라우트 단위 접근 규칙
//!
//! `AuthMiddleware`가 스코프나 개별 라우트에 붙을 때 어떤 토큰을 통과시킬지 정합니다.

use crate::domain::entities::users::ADMIN_ROLE;
use crate::domain::models::auth::authenticated_user::AuthenticatedUser;

/// 토큰이 없을 때의 처리 방식
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AuthMode {
    /// 유효한 액세스 토큰이 없으면 401
    Required,
    /// 토큰이 있으면 검증해서 사용자를 넣고, 없으면 익명으로 진행
    Optional,
}

/// 라우트가 요구하는 역할
///
/// 역할 이름은 저장된 `Role.name`과 대소문자까지 일치해야 합니다.
#[derive(Debug, Clone, PartialEq)]
pub struct RequiredRole(String);

impl RequiredRole {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn admin() -> Self {
        Self::new(ADMIN_ROLE)
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn is_satisfied(&self, user: &AuthenticatedUser) -> bool {
        user.has_role(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(roles: &[&str]) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: "65f0c0ffee0000000000cafe".to_string(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn test_admin_rule_requires_admin_role() {
        let rule = RequiredRole::admin();

        assert_eq!(rule.name(), ADMIN_ROLE);
        assert!(rule.is_satisfied(&user(&["user", ADMIN_ROLE])));
        assert!(!rule.is_satisfied(&user(&["user"])));
        assert!(!rule.is_satisfied(&user(&[])));
    }

    #[test]
    fn test_role_name_is_case_sensitive() {
        let rule = RequiredRole::new("Moderator");
        assert!(!rule.is_satisfied(&user(&["moderator"])));
        assert!(rule.is_satisfied(&user(&["Moderator"])));
    }
}
