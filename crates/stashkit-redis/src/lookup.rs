//! Cache-aside entity lookup.
//!
//! An illustrative consumer of the facade: check the cache for an entity,
//! fall back to the source of truth on a miss, and populate the cache with
//! a fixed TTL so subsequent reads hit. Population is best effort; a cache
//! that is down degrades every read to a source fetch but never fails one.

use crate::facade::RedisCache;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use stashkit_core::{BinarySerializer, CacheError, CacheResult, JsonSerializer};
use tracing::{debug, warn};

/// Default time to live for cached entities: 24 hours.
pub const DEFAULT_LOOKUP_TTL_SECS: u64 = 86_400;

/// The source of truth an entity is fetched from on a cache miss,
/// typically a database mapper. `Ok(None)` means the entity does not
/// exist anywhere.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait EntitySource<T: Send + Sync + 'static>: Send + Sync {
    async fn fetch(&self, id: &str) -> CacheResult<Option<T>>;
}

/// Cache-aside read composition over a [`RedisCache`].
pub struct CacheAsideLookup<S: BinarySerializer = JsonSerializer> {
    cache: Arc<RedisCache<S>>,
    key_prefix: String,
    ttl_secs: u64,
}

impl<S: BinarySerializer> CacheAsideLookup<S> {
    /// Creates a lookup with the default 24-hour TTL.
    pub fn new(cache: Arc<RedisCache<S>>, key_prefix: impl Into<String>) -> Self {
        Self::with_ttl(cache, key_prefix, DEFAULT_LOOKUP_TTL_SECS)
    }

    /// Creates a lookup with an explicit TTL policy.
    pub fn with_ttl(
        cache: Arc<RedisCache<S>>,
        key_prefix: impl Into<String>,
        ttl_secs: u64,
    ) -> Self {
        Self {
            cache,
            key_prefix: key_prefix.into(),
            ttl_secs,
        }
    }

    /// The cache key for an entity id.
    pub fn key_for(&self, id: &str) -> String {
        format!("{}:{}", self.key_prefix, id)
    }

    /// Resolves an entity by id.
    ///
    /// Checks the cache first; on a miss (or any cache failure) fetches
    /// from `source` and populates the cache best-effort with this
    /// lookup's TTL. An entity absent from the source is
    /// [`CacheError::EntityNotFound`]; a source failure propagates.
    pub async fn lookup<T, E>(&self, source: &E, id: &str) -> CacheResult<T>
    where
        T: Serialize + DeserializeOwned + Send + Sync + 'static,
        E: EntitySource<T>,
    {
        let key = self.key_for(id);

        if self.cache.exists(&key).await == 1 {
            // A decode failure or a connection dropped between the two
            // calls degrades to a source fetch.
            match self.cache.try_get::<T>(&key).await {
                Ok(Some(value)) => {
                    debug!(key = %key, "cache hit");
                    return Ok(value);
                }
                Ok(None) => debug!(key = %key, "cache entry vanished, falling back to source"),
                Err(err) => {
                    warn!(key = %key, error = %err, "cache read failed, falling back to source");
                }
            }
        } else {
            debug!(key = %key, "cache miss");
        }

        match source.fetch(id).await? {
            Some(value) => {
                if self.cache.set_ex(&key, &value, self.ttl_secs).await < 0 {
                    warn!(key = %key, "failed to populate cache after miss");
                }
                Ok(value)
            }
            None => Err(CacheError::EntityNotFound(id.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CacheConfig;
    use crate::pool::create_pool;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Account {
        id: String,
        balance: i64,
    }

    fn sample() -> Account {
        Account {
            id: "acct-1".to_string(),
            balance: 250,
        }
    }

    // A pool pointed at a closed port makes every cache call fail fast,
    // which exercises the degraded path without a server.
    fn unreachable_cache() -> Arc<RedisCache> {
        let config = CacheConfig {
            port: 1,
            ..CacheConfig::default()
        };
        Arc::new(RedisCache::new(create_pool(&config).unwrap()))
    }

    #[test]
    fn test_key_for_joins_prefix_and_id() {
        let lookup = CacheAsideLookup::new(unreachable_cache(), "account");
        assert_eq!(lookup.key_for("acct-1"), "account:acct-1");
    }

    #[tokio::test]
    async fn test_miss_with_found_entity_returns_it() {
        let mut source = MockEntitySource::<Account>::new();
        source
            .expect_fetch()
            .times(1)
            .returning(|_| Ok(Some(sample())));

        let lookup = CacheAsideLookup::new(unreachable_cache(), "account");
        let account = lookup.lookup(&source, "acct-1").await.unwrap();
        assert_eq!(account, sample());
    }

    #[tokio::test]
    async fn test_miss_with_absent_entity_is_not_found() {
        let mut source = MockEntitySource::<Account>::new();
        source.expect_fetch().times(1).returning(|_| Ok(None));

        let lookup = CacheAsideLookup::new(unreachable_cache(), "account");
        let err = lookup.lookup(&source, "acct-9").await.unwrap_err();
        assert!(matches!(err, CacheError::EntityNotFound(id) if id == "acct-9"));
    }

    #[tokio::test]
    async fn test_source_failure_propagates() {
        let mut source = MockEntitySource::<Account>::new();
        source
            .expect_fetch()
            .times(1)
            .returning(|_| Err(CacheError::configuration("source offline")));

        let lookup = CacheAsideLookup::new(unreachable_cache(), "account");
        assert!(lookup.lookup(&source, "acct-1").await.is_err());
    }

    #[tokio::test]
    async fn test_populate_failure_is_swallowed() {
        // The unreachable cache makes the post-fetch populate fail; the
        // fetched entity must still come back.
        let mut source = MockEntitySource::<Account>::new();
        source
            .expect_fetch()
            .times(1)
            .returning(|_| Ok(Some(sample())));

        let lookup = CacheAsideLookup::with_ttl(unreachable_cache(), "account", 60);
        let account = lookup.lookup(&source, "acct-1").await.unwrap();
        assert_eq!(account.balance, 250);
    }
}
