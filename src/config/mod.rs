//! # Configuration Module
//!
//! 백엔드 서비스의 설정 관리를 담당하는 모듈입니다.
//! 환경 변수 기반의 설정값들을 정적 설정 구조체로 중앙집중식 관리합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 데이터베이스, 캐시, 검색 인덱스, 서버, 환경 관련 설정
//! - [`auth_config`] - JWT 및 로그인 프로바이더 관련 설정
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::{Environment, ServerConfig, SearchConfig};
//!
//! let env = Environment::current();
//! let bind = ServerConfig::bind_address();
//! let index_path = SearchConfig::index_path();
//! ```
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 서버
//! export HOST="0.0.0.0"
//! export PORT="8080"
//!
//! # 저장소
//! export MONGODB_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="waste_products"
//! export REDIS_URL="redis://localhost:6379"
//! export SEARCH_INDEX_PATH="./data/search_index"
//!
//! # 보안
//! export JWT_SECRET="your-super-secret-key"
//! export BCRYPT_COST="12"          # 4-15 범위
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
