//! 캐싱 계층 모듈
//!
//! Redis를 백엔드로 하는 JSON 캐시를 제공합니다. 상품과 사용자 조회는
//! `#[repository]`가 생성한 `cache_key`(`product_repository:{id}`, `user_repository:{id}`)로
//! 캐시되며, 쓰기 시 `invalidate_cache`로 무효화됩니다.
//!
//! 캐시는 보조 수단입니다. 리포지토리는 캐시 오류를 무시하고 MongoDB로 대체합니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::caching::redis::RedisClient;
//!
//! let cache = RedisClient::new().await?;
//! cache.set_with_expiry("product_repository:65f0c0ffee", &product, 600).await?;
//!
//! let cached: Option<Product> = cache.get("product_repository:65f0c0ffee").await?;
//! let keys = cache.keys("user_repository:*").await?;
//! cache.del_multiple(&keys).await?;
//! ```
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! CACHE_TTL_SECONDS=600             # 엔티티 캐시 TTL
//! ```

pub mod redis;
