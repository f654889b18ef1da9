//! JWT 인증 미들웨어
//!
//! ActixWeb 요청 파이프라인에서 JWT 액세스 토큰을 검증하고 사용자 정보를 추출합니다.
//! 검증된 사용자는 request extensions에 [`AuthenticatedUser`]로 저장되어
//! 핸들러에서 추출자로 받을 수 있습니다.
//!
//! [`AuthenticatedUser`]: crate::domain::models::auth::authenticated_user::AuthenticatedUser

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};

use crate::domain::models::auth::access_rule::{AuthMode, RequiredRole};
use crate::middlewares::auth_inner::AuthMiddlewareService;

/// JWT 인증 미들웨어
pub struct AuthMiddleware {
    mode: AuthMode,
    required_role: Option<RequiredRole>,
}

impl AuthMiddleware {
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            required_role: None,
        }
    }

    pub fn new_with_role(mode: AuthMode, required_role: RequiredRole) -> Self {
        Self {
            mode,
            required_role: Some(required_role),
        }
    }

    pub fn required() -> Self {
        Self::new(AuthMode::Required)
    }

    pub fn optional() -> Self {
        Self::new(AuthMode::Optional)
    }

    /// 관리자 전용 스코프
    pub fn admin() -> Self {
        Self::new_with_role(AuthMode::Required, RequiredRole::admin())
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            mode: self.mode.clone(),
            required_role: self.required_role.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};
    use mongodb::bson::oid::ObjectId;

    use crate::domain::entities::users::User;
    use crate::domain::models::auth::authenticated_user::AuthenticatedUser;
    use crate::services::auth::TokenService;

    async fn whoami(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().body(user.user_id)
    }

    fn user_with_roles(roles: &[&str]) -> User {
        let mut user = User::new("anna@example.com".into(), "anna".into(), "hash".into());
        user.id = Some(ObjectId::new());
        user.roles = roles.iter().map(|r| r.to_string()).collect();
        user
    }

    fn bearer(token: &str) -> (&'static str, String) {
        ("Authorization", format!("Bearer {}", token))
    }

    #[actix_web::test]
    async fn test_required_mode_rejects_missing_token() {
        let app = test::init_service(
            App::new().service(web::scope("/p").wrap(AuthMiddleware::required()).route("", web::get().to(whoami))),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/p").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_access_token_passes_and_refresh_token_is_rejected() {
        let app = test::init_service(
            App::new().service(web::scope("/p").wrap(AuthMiddleware::required()).route("", web::get().to(whoami))),
        )
        .await;
        let user = user_with_roles(&["user"]);
        let pair = TokenService::instance().generate_token_pair(&user).unwrap();

        let req = test::TestRequest::get().uri("/p").insert_header(bearer(&pair.access_token)).to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = test::read_body(res).await;
        assert_eq!(body, user.id_string().unwrap().as_bytes());

        let req = test::TestRequest::get().uri("/p").insert_header(bearer(&pair.refresh_token)).to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_admin_scope_forbids_plain_user() {
        let app = test::init_service(
            App::new().service(web::scope("/admin").wrap(AuthMiddleware::admin()).route("", web::get().to(whoami))),
        )
        .await;
        let service = TokenService::instance();

        let token = service.generate_access_token(&user_with_roles(&["user"])).unwrap();
        let req = test::TestRequest::get().uri("/admin").insert_header(bearer(&token)).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

        let token = service.generate_access_token(&user_with_roles(&["user", "admin"])).unwrap();
        let req = test::TestRequest::get().uri("/admin").insert_header(bearer(&token)).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_optional_mode_lets_anonymous_through() {
        async fn maybe(user: crate::domain::models::auth::authenticated_user::OptionalUser) -> HttpResponse {
            HttpResponse::Ok().body(if user.0.is_some() { "user" } else { "anonymous" })
        }

        let app = test::init_service(
            App::new().service(web::scope("/o").wrap(AuthMiddleware::optional()).route("", web::get().to(maybe))),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/o").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(test::read_body(res).await, "anonymous".as_bytes());
    }
}
