//! 통합 테스트 공용 헬퍼
//!
//! `TEST_MONGODB_URI`가 설정된 경우에만 MongoDB 테스트가 실행되며, 실행마다
//! 고유한 데이터베이스를 만들고 끝나면 삭제합니다. Redis는 연결되지 않는 주소를
//! 사용하므로 캐시는 항상 미스이고, 검색 인덱스는 메모리 인덱스입니다.

#![allow(dead_code)]

use std::sync::Arc;

use mongodb::bson::oid::ObjectId;

use waste_products::caching::redis::RedisClient;
use waste_products::db::Database;
use waste_products::domain::dto::users::request::RegisterRequest;
use waste_products::domain::dto::users::response::UserResponse;
use waste_products::repositories::donations::DonationRepository;
use waste_products::repositories::groups::GroupRepository;
use waste_products::repositories::products::{CategoryRepository, ProductRepository};
use waste_products::repositories::users::{RoleRepository, UserRepository};
use waste_products::search::ProductIndex;
use waste_products::services::auth::TokenService;
use waste_products::services::users::UserService;

pub struct TestStores {
    pub db: Arc<Database>,
    pub redis: Arc<RedisClient>,
    pub index: Arc<ProductIndex>,
}

impl TestStores {
    /// `TEST_MONGODB_URI`가 없으면 None (테스트는 바로 반환합니다).
    pub async fn connect() -> Option<Self> {
        let Ok(uri) = std::env::var("TEST_MONGODB_URI") else {
            eprintln!("TEST_MONGODB_URI not set, skipping");
            return None;
        };

        let _ = env_logger::builder().is_test(true).try_init();

        let database_name = format!("waste_products_test_{}", ObjectId::new().to_hex());
        let db = Database::connect(&uri, &database_name)
            .await
            .expect("MongoDB connection");

        Some(Self {
            db: Arc::new(db),
            redis: Arc::new(RedisClient::from_url("redis://127.0.0.1:1").expect("redis url")),
            index: Arc::new(ProductIndex::in_memory().expect("in-memory index")),
        })
    }

    pub async fn cleanup(self) {
        let _ = self.db.get_database().drop().await;
    }

    pub async fn product_repo(&self) -> Arc<ProductRepository> {
        let repo = Arc::new(ProductRepository::with_dependencies(self.db.clone(), self.redis.clone(), self.index.clone()));
        repo.create_indexes().await.expect("product indexes");
        repo
    }

    pub async fn category_repo(&self) -> Arc<CategoryRepository> {
        let repo = Arc::new(CategoryRepository::with_dependencies(self.db.clone()));
        repo.create_indexes().await.expect("category indexes");
        repo
    }

    pub async fn user_repo(&self) -> Arc<UserRepository> {
        let repo = Arc::new(UserRepository::with_dependencies(self.db.clone(), self.redis.clone()));
        repo.create_indexes().await.expect("user indexes");
        repo
    }

    pub async fn role_repo(&self) -> Arc<RoleRepository> {
        let repo = Arc::new(RoleRepository::with_dependencies(self.db.clone()));
        repo.create_indexes().await.expect("role seed");
        repo
    }

    pub async fn group_repo(&self) -> Arc<GroupRepository> {
        let repo = Arc::new(GroupRepository::with_dependencies(self.db.clone()));
        repo.create_indexes().await.expect("group indexes");
        repo
    }

    pub async fn donation_repo(&self) -> Arc<DonationRepository> {
        let repo = Arc::new(DonationRepository::with_dependencies(self.db.clone()));
        repo.create_indexes().await.expect("donation indexes");
        repo
    }

    pub async fn user_service(&self) -> UserService {
        UserService::with_dependencies(
            self.user_repo().await,
            self.role_repo().await,
            self.product_repo().await,
            TokenService::instance(),
        )
    }
}

pub fn register_request(username: &str) -> RegisterRequest {
    RegisterRequest {
        email: format!("{}@example.com", username),
        username: username.to_string(),
        password: "Recycle2024".to_string(),
        password_confirm: "Recycle2024".to_string(),
    }
}

pub async fn register(service: &UserService, username: &str) -> UserResponse {
    service.register(register_request(username)).await.expect("register")
}
