//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들입니다. Spring의 Controller 계층과 같은
//! 역할을 하며, 요청 본문 검증과 서비스 호출 결과의 HTTP 상태 코드 매핑만 담당합니다.
//!
//! ```text
//! Client
//!   │ HTTP Request/Response
//!   ▼
//! Handlers (이 모듈)      ← 검증, 상태 코드 매핑, 본인/관리자 확인
//!   ▼
//! Services               ← 비즈니스 로직
//!   ▼
//! Repositories           ← MongoDB / Redis / 검색 인덱스
//! ```
//!
//! ## 상태 코드 규칙
//!
//! | 결과 | 상태 코드 |
//! |------|-----------|
//! | 생성 | 201 Created |
//! | 조회/수정 | 200 OK + JSON |
//! | 삭제 | 204 No Content |
//! | 대상 없음 (`None`/`false`) | 404 Not Found |
//! | 이름/이메일/사용자명 중복 | 409 Conflict |
//!
//! ## 모듈 구성
//!
//! - [`auth`] - 회원가입, 로그인, 토큰 갱신, 내 정보
//! - [`users`] - 계정, 친구, 평점, 역할, 클레임, 외부 로그인 기록
//! - [`roles`] - 역할 관리 (관리자)
//! - [`products`] - 상품 카탈로그
//! - [`categories`] - 카테고리
//! - [`barcode`] - 바코드 카탈로그 조회
//! - [`search`] - 전문 검색과 인덱스 관리
//! - [`groups`] - 그룹, 멤버, 게시판, 댓글, 게시판 상품
//! - [`donations`] - 기부 기록 (관리자)

use actix_web::HttpResponse;

use crate::domain::models::auth::authenticated_user::AuthenticatedUser;
use crate::errors::errors::AppError;

pub mod auth;
pub mod users;
pub mod roles;
pub mod products;
pub mod categories;
pub mod barcode;
pub mod search;
pub mod groups;
pub mod donations;

/// 경로의 사용자 id가 토큰 주체와 같거나, 호출자가 관리자인지 확인합니다.
pub fn ensure_self_or_admin(user: &AuthenticatedUser, user_id: &str) -> Result<(), AppError> {
    if user.user_id == user_id || user.is_admin() {
        return Ok(());
    }
    log::warn!("다른 사용자 리소스 접근 거부: {} → {}", user.user_id, user_id);
    Err(AppError::AuthorizationError("본인 또는 관리자만 접근할 수 있습니다".to_string()))
}

/// 서비스가 `false`를 반환한 삭제를 404로 매핑합니다.
pub(crate) fn no_content_or_not_found(deleted: bool, what: &str) -> Result<HttpResponse, AppError> {
    if deleted {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(AppError::NotFound(format!("{}을(를) 찾을 수 없습니다", what)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, roles: &[&str]) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: id.to_string(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn test_self_or_admin() {
        let anna = user("65f0c0ffee0000000000aaaa", &["user"]);
        assert!(ensure_self_or_admin(&anna, "65f0c0ffee0000000000aaaa").is_ok());
        assert!(matches!(
            ensure_self_or_admin(&anna, "65f0c0ffee0000000000bbbb"),
            Err(AppError::AuthorizationError(_))
        ));

        let admin = user("65f0c0ffee0000000000cccc", &["user", "admin"]);
        assert!(ensure_self_or_admin(&admin, "65f0c0ffee0000000000bbbb").is_ok());
    }

    #[test]
    fn test_delete_mapping() {
        assert_eq!(no_content_or_not_found(true, "상품").unwrap().status(), 204);
        assert!(matches!(no_content_or_not_found(false, "상품"), Err(AppError::NotFound(_))));
    }
}
