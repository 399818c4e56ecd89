//! Key-management operations: deletion, existence, expiry, TTL queries.

use super::{or_sentinel, RedisCache};
use redis::AsyncCommands;
use stashkit_core::{BinarySerializer, CacheResult};

impl<S: BinarySerializer> RedisCache<S> {
    /// Deletes keys, returning the number actually removed.
    pub async fn try_del(&self, keys: &[&str]) -> CacheResult<i64> {
        let mut conn = self.conn().await?;
        Ok(conn.del(keys).await?)
    }

    /// Deletes keys. Returns the number removed, or `-1` on failure.
    pub async fn del(&self, keys: &[&str]) -> i64 {
        let result = self.try_del(keys).await;
        or_sentinel("DEL", keys.first().copied().unwrap_or(""), result, -1)
    }

    /// Checks whether a key exists.
    pub async fn try_exists(&self, key: &str) -> CacheResult<bool> {
        let mut conn = self.conn().await?;
        Ok(conn.exists(key).await?)
    }

    /// Checks existence. Returns `1` if the key exists, `0` if not, `-1`
    /// on failure.
    pub async fn exists(&self, key: &str) -> i64 {
        let result = self.try_exists(key).await.map(i64::from);
        or_sentinel("EXISTS", key, result, -1)
    }

    /// Sets a key's time to live in seconds.
    pub async fn try_expire(&self, key: &str, seconds: i64) -> CacheResult<bool> {
        let mut conn = self.conn().await?;
        Ok(conn.expire(key, seconds).await?)
    }

    /// Sets a TTL in seconds. Returns `1` if the expiry was set, `0` if
    /// the key does not exist, `-1` on failure.
    pub async fn expire(&self, key: &str, seconds: i64) -> i64 {
        let result = self.try_expire(key, seconds).await.map(i64::from);
        or_sentinel("EXPIRE", key, result, -1)
    }

    /// Sets a key's time to live in milliseconds.
    pub async fn try_pexpire(&self, key: &str, milliseconds: i64) -> CacheResult<bool> {
        let mut conn = self.conn().await?;
        Ok(conn.pexpire(key, milliseconds).await?)
    }

    /// Sets a TTL in milliseconds. Returns `1`/`0`/`-1` like [`expire`](Self::expire).
    pub async fn pexpire(&self, key: &str, milliseconds: i64) -> i64 {
        let result = self.try_pexpire(key, milliseconds).await.map(i64::from);
        or_sentinel("PEXPIRE", key, result, -1)
    }

    /// Sets an absolute expiry as a unix timestamp in seconds.
    pub async fn try_expire_at(&self, key: &str, unix_time: i64) -> CacheResult<bool> {
        let mut conn = self.conn().await?;
        Ok(conn.expire_at(key, unix_time).await?)
    }

    /// Sets an absolute expiry (seconds). Returns `1`/`0`/`-1`.
    pub async fn expire_at(&self, key: &str, unix_time: i64) -> i64 {
        let result = self.try_expire_at(key, unix_time).await.map(i64::from);
        or_sentinel("EXPIREAT", key, result, -1)
    }

    /// Sets an absolute expiry as a unix timestamp in milliseconds.
    pub async fn try_pexpire_at(&self, key: &str, unix_time_ms: i64) -> CacheResult<bool> {
        let mut conn = self.conn().await?;
        Ok(conn.pexpire_at(key, unix_time_ms).await?)
    }

    /// Sets an absolute expiry (milliseconds). Returns `1`/`0`/`-1`.
    pub async fn pexpire_at(&self, key: &str, unix_time_ms: i64) -> i64 {
        let result = self.try_pexpire_at(key, unix_time_ms).await.map(i64::from);
        or_sentinel("PEXPIREAT", key, result, -1)
    }

    /// Removes a key's expiry.
    pub async fn try_persist(&self, key: &str) -> CacheResult<bool> {
        let mut conn = self.conn().await?;
        Ok(conn.persist(key).await?)
    }

    /// Removes a key's expiry. Returns `1` if removed, `0` if the key has
    /// no expiry or does not exist, `-1` on failure.
    pub async fn persist(&self, key: &str) -> i64 {
        let result = self.try_persist(key).await.map(i64::from);
        or_sentinel("PERSIST", key, result, -1)
    }

    /// Queries remaining time to live in seconds. The store's own
    /// convention passes through: `-1` means no expiry, `-2` means the key
    /// does not exist.
    pub async fn try_ttl(&self, key: &str) -> CacheResult<i64> {
        let mut conn = self.conn().await?;
        Ok(conn.ttl(key).await?)
    }

    /// TTL in seconds. Returns the remaining seconds, `-1` for no expiry,
    /// `-2` for a missing key, `-3` on failure.
    pub async fn ttl(&self, key: &str) -> i64 {
        let result = self.try_ttl(key).await;
        or_sentinel("TTL", key, result, -3)
    }

    /// Queries remaining time to live in milliseconds.
    pub async fn try_pttl(&self, key: &str) -> CacheResult<i64> {
        let mut conn = self.conn().await?;
        Ok(conn.pttl(key).await?)
    }

    /// TTL in milliseconds. Returns the remaining milliseconds, `-1` for
    /// no expiry, `-2` for a missing key, `-3` on failure.
    pub async fn pttl(&self, key: &str) -> i64 {
        let result = self.try_pttl(key).await;
        or_sentinel("PTTL", key, result, -3)
    }
}
