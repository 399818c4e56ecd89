//! Redis connection pool construction.
//!
//! The pool is built once at startup and injected into the facade; the
//! facade itself never caches connections. Dropping the pool at process
//! teardown closes the remaining connections.

use crate::config::CacheConfig;
use deadpool_redis::{Config, Pool, Runtime};
use stashkit_core::{CacheError, CacheResult};
use tracing::info;

/// Creates a bounded Redis connection pool from the given configuration.
///
/// Connections are established lazily on first borrow and are not
/// validated on borrow or return. Every acquisition is bounded by the
/// configured wait and create timeouts.
pub fn create_pool(config: &CacheConfig) -> CacheResult<Pool> {
    let cfg = Config::from_url(config.url());

    let pool = cfg
        .builder()
        .map_err(|e| CacheError::configuration(format!("invalid redis config: {}", e)))?
        .max_size(config.max_size)
        .wait_timeout(Some(config.timeouts.wait()))
        .create_timeout(Some(config.timeouts.create()))
        .recycle_timeout(Some(config.timeouts.recycle()))
        .runtime(Runtime::Tokio1)
        .build()
        .map_err(|e| CacheError::configuration(format!("failed to create pool: {}", e)))?;

    info!(
        host = %config.host,
        port = config.port,
        max_size = config.max_size,
        "created redis connection pool"
    );

    Ok(pool)
}

/// Creates a pool and verifies connectivity with a single `PING`.
pub async fn create_pool_checked(config: &CacheConfig) -> CacheResult<Pool> {
    let pool = create_pool(config)?;

    let mut conn = pool.get().await?;
    redis::cmd("PING").query_async::<String>(&mut conn).await?;

    info!("redis connection verified");

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_pool_from_defaults() {
        // Construction is lazy; no server is needed until first borrow.
        let pool = create_pool(&CacheConfig::default()).unwrap();
        assert_eq!(pool.status().max_size, 16);
    }

    #[tokio::test]
    async fn test_acquire_from_unreachable_host_fails() {
        let config = CacheConfig {
            port: 1,
            ..CacheConfig::default()
        };
        let pool = create_pool(&config).unwrap();
        let Err(err) = pool.get().await else {
            panic!("acquisition from a closed port must fail");
        };
        let cache_err = CacheError::from(err);
        assert!(cache_err.is_connection());
    }

    #[tokio::test]
    async fn test_create_pool_checked_fails_fast_without_server() {
        let config = CacheConfig {
            port: 1,
            ..CacheConfig::default()
        };
        assert!(create_pool_checked(&config).await.is_err());
    }
}
