//! 데이터 및 서버 설정 관리 모듈
//!
//! 데이터베이스, 캐시, 검색 인덱스, 서버, 환경 및 보안 관련 설정을 관리합니다.

use std::env;
use std::str::FromStr;

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 개발 환경 - 빠른 개발을 위한 설정
    Development,
    /// 테스트 환경 - 자동화된 테스트용 설정
    Test,
    /// 스테이징 환경 - 프로덕션 유사 환경
    Staging,
    /// 프로덕션 환경 - 최고 수준의 보안 및 성능
    Production,
}

impl Environment {
    /// 현재 실행 환경을 감지합니다.
    ///
    /// `ENVIRONMENT` 환경 변수를 확인하며,
    /// 설정되지 않은 경우 `Production`을 기본값으로 사용합니다.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// if Environment::current() == Environment::Development {
    ///     log::debug!("개발 환경에서 실행 중");
    /// }
    /// ```
    pub fn current() -> Self {
        Self::from_name(&env::var("ENVIRONMENT").unwrap_or_else(|_| "production".to_string()))
    }

    /// 문자열에서 Environment를 생성합니다. 알 수 없는 값은 `Production`입니다.
    pub fn from_name(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }
}

/// 환경 변수를 읽어 파싱하고, 없거나 파싱에 실패하면 기본값을 사용합니다.
pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse::<T>().ok())
        .unwrap_or(default)
}

/// 패스워드 해싱 설정
pub struct PasswordConfig;

impl PasswordConfig {
    /// 현재 환경에 맞는 bcrypt cost를 반환합니다.
    ///
    /// `BCRYPT_COST`가 4-15 범위이면 그 값을, 아니면 환경별 기본값을 사용합니다.
    pub fn bcrypt_cost() -> u32 {
        if let Ok(cost_str) = env::var("BCRYPT_COST") {
            if let Ok(cost) = cost_str.parse::<u32>() {
                if (4..=15).contains(&cost) {
                    return cost;
                }
            }
        }

        Self::bcrypt_cost_for_env(&Environment::current())
    }

    /// 특정 환경에 대한 bcrypt cost를 반환합니다.
    ///
    /// - Development/Test: 4 (빠른 처리)
    /// - Staging: 10 (중간 보안)
    /// - Production: 12 (고보안)
    pub fn bcrypt_cost_for_env(env: &Environment) -> u32 {
        match env {
            Environment::Development => 4,
            Environment::Test => 4,
            Environment::Staging => 10,
            Environment::Production => 12,
        }
    }
}

/// 서버 바인딩 설정
pub struct ServerConfig;

impl ServerConfig {
    /// 서버가 바인딩할 포트 (`PORT`, 기본값: 8080)
    pub fn port() -> u16 {
        env_or("PORT", 8080)
    }

    /// 서버가 바인딩할 호스트 주소 (`HOST`, 기본값: "127.0.0.1")
    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string())
    }

    /// HTTP 워커 스레드 수 (`WORKERS`, 기본값: 4)
    pub fn workers() -> usize {
        env_or("WORKERS", 4)
    }

    pub fn bind_address() -> String {
        format!("{}:{}", Self::host(), Self::port())
    }
}

/// MongoDB 연결 설정
pub struct DatabaseConfig;

impl DatabaseConfig {
    pub fn uri() -> String {
        env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string())
    }

    pub fn database_name() -> String {
        env::var("DATABASE_NAME").unwrap_or_else(|_| "waste_products_dev".to_string())
    }
}

/// Redis 캐시 설정
pub struct CacheConfig;

impl CacheConfig {
    pub fn redis_url() -> String {
        env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string())
    }

    /// 엔티티 캐시 TTL (초 단위, 기본값: 600)
    pub fn ttl_seconds() -> usize {
        env_or("CACHE_TTL_SECONDS", 600)
    }
}

/// 전문 검색 인덱스 설정
///
/// # Environment Variables
///
/// - `SEARCH_INDEX_PATH`: 인덱스 디렉토리 (기본값: `./data/search_index`)
/// - `SEARCH_WRITER_MEMORY_BYTES`: 인덱스 writer 메모리 예산 (기본값: 50MB)
/// - `SEARCH_DEFAULT_LIMIT`: 결과 수 미지정 시 기본값 (기본값: 100)
/// - `SEARCH_MAX_LIMIT`: 한 번에 반환할 수 있는 최대 결과 수 (기본값: 1000)
pub struct SearchConfig;

impl SearchConfig {
    pub fn index_path() -> String {
        env::var("SEARCH_INDEX_PATH").unwrap_or_else(|_| "./data/search_index".to_string())
    }

    pub fn writer_memory_bytes() -> usize {
        env_or("SEARCH_WRITER_MEMORY_BYTES", 50_000_000)
    }

    pub fn default_limit() -> usize {
        env_or("SEARCH_DEFAULT_LIMIT", 100)
    }

    pub fn max_limit() -> usize {
        env_or("SEARCH_MAX_LIMIT", 1000)
    }

    /// 요청된 결과 수를 `1..=max_limit` 범위로 보정합니다.
    pub fn clamp_limit(requested: Option<usize>) -> usize {
        requested
            .unwrap_or_else(Self::default_limit)
            .clamp(1, Self::max_limit().max(1))
    }
}

/// Rate Limiting 설정
#[derive(Debug)]
pub struct RateLimitConfig {
    pub per_second: u64,
    pub burst_size: u32,
}

impl RateLimitConfig {
    /// `RATE_LIMIT_PER_SECOND`(기본 100), `RATE_LIMIT_BURST_SIZE`(기본 200)를 읽습니다.
    pub fn from_env() -> Self {
        Self {
            per_second: env_or("RATE_LIMIT_PER_SECOND", 100),
            burst_size: env_or("RATE_LIMIT_BURST_SIZE", 200),
        }
    }
}
