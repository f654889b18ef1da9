//! WasteProducts 백엔드 메인 애플리케이션
//!
//! Actix-web 기반의 HTTP 서버를 구동하고 모든 컴포넌트를 초기화합니다.
//! MongoDB, Redis 연결과 상품 검색 인덱스를 준비한 뒤 REST API를 제공합니다.

use std::sync::Arc;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware, App, HttpServer};
use actix_governor::{Governor, GovernorConfigBuilder};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};
use waste_products::caching::redis::RedisClient;
use waste_products::config::{JwtConfig, RateLimitConfig, SearchConfig, ServerConfig};
use waste_products::core::registry::ServiceLocator;
use waste_products::db::Database;
use waste_products::repositories;
use waste_products::routes::configure_all_routes;
use waste_products::search::ProductIndex;
use waste_products::utils::display_terminal::print_server_ready;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    load_env_file();
    init_logging();

    info!("🚀 WasteProducts 서비스 시작중...");

    JwtConfig::validate().map_err(|e| startup_error("JWT 설정 오류", e))?;

    let (database, redis_client, product_index) = initialize_data_stores().await?;
    let indexed_products = product_index.num_docs() as usize;

    // 매크로로 관리되지 않는 인프라 컴포넌트 등록
    ServiceLocator::set(database);
    ServiceLocator::set(redis_client);
    ServiceLocator::set(product_index);

    ServiceLocator::initialize_all()
        .await
        .map_err(|e| startup_error("서비스 초기화 실패", e))?;

    repositories::init_all()
        .await
        .map_err(|e| startup_error("컬렉션 초기화 실패", e))?;

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    start_http_server(indexed_products).await
}

fn startup_error(context: &str, e: impl std::fmt::Display) -> std::io::Error {
    error!("❌ {}: {}", context, e);
    std::io::Error::other(format!("{}: {}", context, e))
}

/// HTTP 서버를 구성하고 실행합니다
///
/// Rate limiting, CORS, 요청 로깅, 경로 정규화 미들웨어를 적용합니다.
///
/// ```rust,ignore
/// // 기본 바인딩: 127.0.0.1:8080
/// // Health check: http://127.0.0.1:8080/health
/// // API: http://127.0.0.1:8080/api/*
/// ```
async fn start_http_server(indexed_products: usize) -> std::io::Result<()> {
    let bind_address = ServerConfig::bind_address();

    print_server_ready(&bind_address, indexed_products);
    info!("📍 Health check: http://{}/health", bind_address);

    let rate_limit_config = RateLimitConfig::from_env();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| startup_error("Rate limit 설정 오류", format!("{:?}", rate_limit_config)))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second,
        rate_limit_config.burst_size
    );

    HttpServer::new(move || {
        let cors = configure_cors();

        App::new()
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_all_routes)
    })
        .bind(bind_address)?
        .workers(ServerConfig::workers())
        .run()
        .await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    info!("Current profile: {}", profile);

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// `RUST_LOG` 기반 로깅 초기화 (기본값: "info,actix_web=debug")
///
/// ```bash
/// RUST_LOG=waste_products::services=debug cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// MongoDB, Redis 연결과 상품 검색 인덱스를 준비합니다.
///
/// 하나라도 실패하면 서버를 시작하지 않습니다.
async fn initialize_data_stores() -> std::io::Result<(Arc<Database>, Arc<RedisClient>, Arc<ProductIndex>)> {
    info!("📡 데이터베이스 연결 중...");

    let database = Database::new()
        .await
        .map_err(|e| startup_error("데이터베이스 연결 실패", e))?;
    info!("✅ MongoDB 연결 성공");

    let redis_client = RedisClient::new()
        .await
        .map_err(|e| startup_error("Redis 연결 실패", e))?;
    info!("✅ Redis 연결 성공");

    let index_path = SearchConfig::index_path();
    let product_index = ProductIndex::open(&index_path)
        .map_err(|e| startup_error("검색 인덱스 열기 실패", e))?;
    info!("✅ 검색 인덱스 준비: {} ({}개 문서)", index_path, product_index.num_docs());

    Ok((Arc::new(database), Arc::new(redis_client), Arc::new(product_index)))
}

/// 로컬 프론트엔드 개발 서버를 허용하는 CORS 설정
fn configure_cors() -> Cors {
    Cors::default()
        .allowed_origin("http://localhost:4200")
        .allowed_origin("http://127.0.0.1:4200")
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_origin("http://localhost:8080")
        .allowed_origin("http://127.0.0.1:8080")
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .supports_credentials()
        // Preflight 요청 캐시 시간 (초)
        .max_age(3600)
}
