//! API 라우트 설정 모듈
//!
//! RESTful API 엔드포인트들을 기능별 스코프로 묶어 등록합니다.
//!
//! # Auth Middleware Usage
//!
//! 라우트에 따라 다른 인증 레벨을 적용합니다.
//!
//! ## 인증 불필요 (Public)
//! ```rust,ignore
//! cfg.service(
//!     web::scope("/api/auth")
//!         .service(handlers::auth::register)
//!         .service(handlers::auth::login)
//! );
//! ```
//!
//! ## 인증 필요
//! ```rust,ignore
//! cfg.service(
//!     web::scope("/api/groups")
//!         .wrap(AuthMiddleware::required())
//!         .service(handlers::groups::create_group)
//! );
//! ```
//!
//! ## 관리자 전용
//! ```rust,ignore
//! cfg.service(
//!     web::scope("/api/roles")
//!         .wrap(AuthMiddleware::admin())
//!         .service(handlers::roles::get_roles)
//! );
//! ```
//!
//! 공개 조회와 인증이 필요한 변경이 같은 접두어를 쓰는 경우(상품, 카테고리,
//! 검색)에는 핸들러 속성의 `wrap`으로 라우트 단위 인증을 겁니다. actix 스코프는
//! 접두어가 일치하면 다음 스코프로 넘어가지 않기 때문입니다.

use crate::handlers;
use crate::middlewares::AuthMiddleware;
use actix_web::web;
use serde_json::json;

/// 모든 라우트를 설정합니다
///
/// ```rust,ignore
/// use actix_web::{web, App};
///
/// let app = App::new().configure(configure_all_routes);
/// ```
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check);

    configure_auth_routes(cfg);
    configure_catalog_routes(cfg);
    configure_search_routes(cfg);
    configure_user_routes(cfg);
    configure_group_routes(cfg);
    configure_donation_routes(cfg);
}

/// 회원가입, 로그인, 토큰 갱신, 내 정보
///
/// ```bash
/// curl -X POST http://localhost:8080/api/auth/login \
///   -H "Content-Type: application/json" \
///   -d '{"email":"anna@example.com","password":"Recycle2024"}'
/// ```
fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/auth")
            .service(handlers::auth::register)
            .service(handlers::auth::login)
            .service(handlers::auth::refresh)
            .service(handlers::auth::me)
    );
}

/// 상품, 카테고리, 바코드 카탈로그
fn configure_catalog_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/products")
            .service(handlers::products::get_products)
            .service(handlers::products::get_product_by_name)
            .service(handlers::products::get_products_by_category)
            .service(handlers::products::get_product)
            // 변경 라우트 (route 단위 wrap)
            .service(handlers::products::add_product)
            .service(handlers::products::add_product_by_barcode)
            .service(handlers::products::update_product)
            .service(handlers::products::add_product_to_category)
            .service(handlers::products::delete_product)
    );

    cfg.service(
        web::scope("/api/categories")
            .service(handlers::categories::get_categories)
            .service(handlers::categories::get_category)
            .service(handlers::categories::add_category)
            .service(handlers::categories::delete_categories)
            .service(handlers::categories::set_description)
            .service(handlers::categories::delete_category)
    );

    cfg.service(
        web::scope("/api/barcode")
            .service(handlers::barcode::get_by_barcode)
    );
}

/// 상품 검색과 인덱스 관리
///
/// ```bash
/// curl "http://localhost:8080/api/search/products?query=milk&limit=10"
/// ```
fn configure_search_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/search")
            .service(handlers::search::search_products)
            .service(handlers::search::optimize_index)
            .service(handlers::search::rebuild_index)
            .service(handlers::search::clear_index)
    );
}

/// 사용자와 역할
///
/// `/api/users`는 인증이 필요하며 본인/관리자 확인은 핸들러에서 합니다.
/// `/api/roles`는 관리자 전용입니다.
fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/users")
            .wrap(AuthMiddleware::required())
            .service(handlers::users::get_users)
            .service(handlers::users::get_user)
            .service(handlers::users::update_user)
            .service(handlers::users::delete_user)
            .service(handlers::users::update_email)
            .service(handlers::users::update_username)
            .service(handlers::users::reset_password)
            .service(handlers::users::get_friends)
            .service(handlers::users::add_friend)
            .service(handlers::users::delete_friend)
            .service(handlers::users::get_product_descriptions)
            .service(handlers::users::add_product_description)
            .service(handlers::users::delete_product_description)
            .service(handlers::users::get_roles)
            .service(handlers::users::add_to_role)
            .service(handlers::users::remove_from_role)
            .service(handlers::users::add_claim)
            .service(handlers::users::remove_claim)
            .service(handlers::users::add_login)
            .service(handlers::users::remove_login)
    );

    cfg.service(
        web::scope("/api/roles")
            .wrap(AuthMiddleware::admin())
            .service(handlers::roles::create_role)
            .service(handlers::roles::get_roles)
            .service(handlers::roles::get_role_by_name)
            .service(handlers::roles::get_role_users)
            .service(handlers::roles::get_role)
            .service(handlers::roles::update_role)
            .service(handlers::roles::delete_role)
    );
}

/// 그룹 (전체 인증 필요, `/mine`은 `/{group_id}`보다 먼저 등록)
fn configure_group_routes(cfg: &mut web::ServiceConfig) {
    use handlers::groups::*;

    cfg.service(
        web::scope("/api/groups")
            .wrap(AuthMiddleware::required())
            .service(create_group)
            .service(get_my_groups)
            .service(get_group)
            .service(update_group)
            .service(delete_group)
            .service(get_members)
            .service(invite_user)
            .service(accept_invitation)
            .service(dismiss_invitation)
            .service(leave_group)
            .service(remove_member)
            .service(set_board_rights)
            .service(create_board)
            .service(get_boards)
            .service(get_board)
            .service(update_board)
            .service(delete_board)
            .service(create_comment)
            .service(update_comment)
            .service(get_comment)
            .service(delete_comment)
            .service(get_board_comments)
            .service(create_group_product)
            .service(update_group_product)
            .service(get_group_product)
            .service(delete_group_product)
            .service(get_board_products)
    );
}

fn configure_donation_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/donations")
            .wrap(AuthMiddleware::admin())
            .service(handlers::donations::record_donation)
            .service(handlers::donations::get_donations)
            .service(handlers::donations::get_donor_donations)
    );
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// ```json
/// {
///   "status": "healthy",
///   "service": "waste_products",
///   "version": "0.1.0",
///   "timestamp": "2026-01-01T00:00:00Z",
///   "features": {
///     "database": "MongoDB",
///     "cache": "Redis",
///     "search": "tantivy"
///   }
/// }
/// ```
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "waste_products",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "database": "MongoDB",
            "cache": "Redis",
            "search": "tantivy"
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};
    use mongodb::bson::oid::ObjectId;

    use crate::domain::entities::users::User;
    use crate::services::auth::TokenService;

    fn token_for(roles: &[&str]) -> (String, String) {
        let mut user = User::new("anna@example.com".into(), "anna_k".into(), "hash".into());
        user.id = Some(ObjectId::new());
        user.roles = roles.iter().map(|r| r.to_string()).collect();
        let token = TokenService::instance().generate_access_token(&user).unwrap();
        (user.id_string().unwrap(), format!("Bearer {}", token))
    }

    #[actix_web::test]
    async fn test_health_check() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "waste_products");
    }

    #[actix_web::test]
    async fn test_protected_routes_require_token() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        for req in [
            test::TestRequest::get().uri("/api/auth/me"),
            test::TestRequest::get().uri("/api/users"),
            test::TestRequest::get().uri("/api/groups/mine"),
            test::TestRequest::get().uri("/api/donations"),
            test::TestRequest::post().uri("/api/products"),
            test::TestRequest::post().uri("/api/search/rebuild"),
        ] {
            let res = test::call_service(&app, req.to_request()).await;
            assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[actix_web::test]
    async fn test_admin_routes_forbid_plain_user() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;
        let (_, bearer) = token_for(&["user"]);

        for req in [
            test::TestRequest::get().uri("/api/users"),
            test::TestRequest::get().uri("/api/roles"),
            test::TestRequest::get().uri("/api/donations"),
            test::TestRequest::delete().uri("/api/products/65f0c0ffee0000000000beef"),
            test::TestRequest::delete().uri("/api/categories/Dairy"),
            test::TestRequest::delete().uri("/api/search"),
        ] {
            let res = test::call_service(&app, req.insert_header(("Authorization", bearer.clone())).to_request()).await;
            assert_eq!(res.status(), StatusCode::FORBIDDEN);
        }
    }

    #[actix_web::test]
    async fn test_user_cannot_read_another_user() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;
        let (_, bearer) = token_for(&["user"]);
        let other = ObjectId::new().to_hex();

        for uri in [
            format!("/api/users/{}", other),
            format!("/api/users/{}/friends", other),
            format!("/api/users/{}/products", other),
            format!("/api/users/{}/roles", other),
        ] {
            let req = test::TestRequest::get()
                .uri(&uri)
                .insert_header(("Authorization", bearer.clone()))
                .to_request();
            let res = test::call_service(&app, req).await;
            assert_eq!(res.status(), StatusCode::FORBIDDEN);
        }
    }
}
