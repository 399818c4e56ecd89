//! Stashkit Redis - typed cache-access facade
//!
//! A cache client library implementing the cache-aside read pattern over a
//! bounded Redis connection pool:
//! - ~130 operation variants across scalar, hash, list, set, and sorted-set
//!   families, each in raw-string, integer, and typed-object form
//! - a single acquire/execute/release primitive behind every operation,
//!   with per-family sentinel values on failure and a parallel `try_*`
//!   Result surface for callers who need to tell "absent" from "failed"
//! - a pluggable binary serialization boundary for typed values
//! - an illustrative cache-aside lookup composing the facade with an
//!   external source of truth
//!
//! # Example
//!
//! ```rust,ignore
//! use stashkit_redis::{create_pool, CacheConfig, RedisCache};
//!
//! let pool = create_pool(&CacheConfig::default())?;
//! let cache = RedisCache::new(pool);
//!
//! cache.set_string("greeting", "hello").await;          // 0 ok, -1 failed
//! let hit = cache.get_string("greeting").await;          // Some("hello")
//! let ttl = cache.ttl("greeting").await;                 // -1: no expiry
//!
//! // Result surface, when sentinel conflation is not acceptable:
//! let count: i64 = cache.try_incr("hits").await?;
//! ```

pub mod config;
pub mod facade;
pub mod lookup;
pub mod pool;

pub use config::{CacheConfig, PoolTimeouts};
pub use facade::RedisCache;
pub use lookup::{CacheAsideLookup, EntitySource, DEFAULT_LOOKUP_TTL_SECS};
pub use pool::{create_pool, create_pool_checked};

// Re-exported so facade consumers do not need a direct stashkit-core
// dependency for the common types.
pub use stashkit_core::{BinarySerializer, CacheError, CacheResult, JsonSerializer};
