//! List operations in raw-string, integer, and typed-object variants.

use super::{or_sentinel, parse_i64, parse_opt_i64, RedisCache};
use redis::AsyncCommands;
use serde::de::DeserializeOwned;
use serde::Serialize;
use stashkit_core::{BinarySerializer, CacheResult};

impl<S: BinarySerializer> RedisCache<S> {
    // ---- positional reads ---------------------------------------------

    /// Reads the element at `index`. Out-of-range and absent keys are
    /// `Ok(None)`.
    pub async fn try_lindex_string(&self, key: &str, index: isize) -> CacheResult<Option<String>> {
        let mut conn = self.conn().await?;
        Ok(conn.lindex(key, index).await?)
    }

    /// Reads the element at `index`. `None` when out of range or on
    /// failure.
    pub async fn lindex_string(&self, key: &str, index: isize) -> Option<String> {
        self.lindex_string_or(key, index, None).await
    }

    /// Reads the element at `index` with an explicit failure default.
    pub async fn lindex_string_or(
        &self,
        key: &str,
        index: isize,
        value_of_err: Option<String>,
    ) -> Option<String> {
        let result = self.try_lindex_string(key, index).await;
        or_sentinel("LINDEX", key, result, value_of_err)
    }

    /// Reads the integer element at `index`. Out-of-range is `Ok(None)`.
    pub async fn try_lindex_long(&self, key: &str, index: isize) -> CacheResult<Option<i64>> {
        let mut conn = self.conn().await?;
        let raw: Option<String> = conn.lindex(key, index).await?;
        parse_opt_i64(raw)
    }

    /// Reads the integer element at `index`. Out-of-range and failure
    /// both map to `0`.
    pub async fn lindex_long(&self, key: &str, index: isize) -> i64 {
        self.lindex_long_or(key, index, 0).await
    }

    /// Reads the integer element at `index`. Out-of-range and failure
    /// both map to `value_of_err`.
    pub async fn lindex_long_or(&self, key: &str, index: isize, value_of_err: i64) -> i64 {
        let result = self
            .try_lindex_long(key, index)
            .await
            .map(|v| v.unwrap_or(value_of_err));
        or_sentinel("LINDEX", key, result, value_of_err)
    }

    /// Reads the typed element at `index`. Out-of-range is `Ok(None)`.
    pub async fn try_lindex<T: DeserializeOwned>(
        &self,
        key: &str,
        index: isize,
    ) -> CacheResult<Option<T>> {
        let mut conn = self.conn().await?;
        let data: Option<Vec<u8>> = conn.lindex(key, index).await?;
        self.decode_opt(data)
    }

    /// Reads the typed element at `index`. `None` when out of range or on
    /// failure.
    pub async fn lindex<T: DeserializeOwned>(&self, key: &str, index: isize) -> Option<T> {
        let result = self.try_lindex(key, index).await;
        or_sentinel("LINDEX", key, result, None)
    }

    /// Measures a list's length. An absent key measures `0`.
    pub async fn try_llen(&self, key: &str) -> CacheResult<i64> {
        let mut conn = self.conn().await?;
        Ok(conn.llen(key).await?)
    }

    /// Measures list length. Returns the length, `-1` on failure.
    pub async fn llen(&self, key: &str) -> i64 {
        let result = self.try_llen(key).await;
        or_sentinel("LLEN", key, result, -1)
    }

    // ---- pops ---------------------------------------------------------

    /// Pops the head element. An empty or absent list is `Ok(None)`.
    pub async fn try_lpop_string(&self, key: &str) -> CacheResult<Option<String>> {
        let mut conn = self.conn().await?;
        Ok(conn.lpop(key, None).await?)
    }

    /// Pops the head element. `None` when empty or on failure.
    pub async fn lpop_string(&self, key: &str) -> Option<String> {
        self.lpop_string_or(key, None).await
    }

    /// Pops the head element with an explicit failure default.
    pub async fn lpop_string_or(&self, key: &str, value_of_err: Option<String>) -> Option<String> {
        let result = self.try_lpop_string(key).await;
        or_sentinel("LPOP", key, result, value_of_err)
    }

    /// Pops the head integer. An empty or absent list is `Ok(None)`.
    pub async fn try_lpop_long(&self, key: &str) -> CacheResult<Option<i64>> {
        let mut conn = self.conn().await?;
        let raw: Option<String> = conn.lpop(key, None).await?;
        parse_opt_i64(raw)
    }

    /// Pops the head integer. Empty maps to `0`, as does any failure.
    pub async fn lpop_long(&self, key: &str) -> i64 {
        self.lpop_long_or(key, 0).await
    }

    /// Pops the head integer with an explicit failure default. Empty
    /// still maps to `0`.
    pub async fn lpop_long_or(&self, key: &str, value_of_err: i64) -> i64 {
        let result = self
            .try_lpop_long(key)
            .await
            .map(Option::unwrap_or_default);
        or_sentinel("LPOP", key, result, value_of_err)
    }

    /// Pops the head typed element.
    pub async fn try_lpop<T: DeserializeOwned>(&self, key: &str) -> CacheResult<Option<T>> {
        let mut conn = self.conn().await?;
        let data: Option<Vec<u8>> = conn.lpop(key, None).await?;
        self.decode_opt(data)
    }

    /// Pops the head typed element. `None` when empty or on failure.
    pub async fn lpop<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let result = self.try_lpop(key).await;
        or_sentinel("LPOP", key, result, None)
    }

    /// Pops the tail element.
    pub async fn try_rpop_string(&self, key: &str) -> CacheResult<Option<String>> {
        let mut conn = self.conn().await?;
        Ok(conn.rpop(key, None).await?)
    }

    /// Pops the tail element. `None` when empty or on failure.
    pub async fn rpop_string(&self, key: &str) -> Option<String> {
        self.rpop_string_or(key, None).await
    }

    /// Pops the tail element with an explicit failure default.
    pub async fn rpop_string_or(&self, key: &str, value_of_err: Option<String>) -> Option<String> {
        let result = self.try_rpop_string(key).await;
        or_sentinel("RPOP", key, result, value_of_err)
    }

    /// Pops the tail integer.
    pub async fn try_rpop_long(&self, key: &str) -> CacheResult<Option<i64>> {
        let mut conn = self.conn().await?;
        let raw: Option<String> = conn.rpop(key, None).await?;
        parse_opt_i64(raw)
    }

    /// Pops the tail integer. Empty maps to `0`, as does any failure.
    pub async fn rpop_long(&self, key: &str) -> i64 {
        self.rpop_long_or(key, 0).await
    }

    /// Pops the tail integer. An empty list and any failure both map to
    /// `value_of_err`, unlike the head pop where empty stays `0`.
    pub async fn rpop_long_or(&self, key: &str, value_of_err: i64) -> i64 {
        let result = self
            .try_rpop_long(key)
            .await
            .map(|v| v.unwrap_or(value_of_err));
        or_sentinel("RPOP", key, result, value_of_err)
    }

    /// Pops the tail typed element.
    pub async fn try_rpop<T: DeserializeOwned>(&self, key: &str) -> CacheResult<Option<T>> {
        let mut conn = self.conn().await?;
        let data: Option<Vec<u8>> = conn.rpop(key, None).await?;
        self.decode_opt(data)
    }

    /// Pops the tail typed element. `None` when empty or on failure.
    pub async fn rpop<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let result = self.try_rpop(key).await;
        or_sentinel("RPOP", key, result, None)
    }

    // ---- pushes -------------------------------------------------------

    /// Pushes raw strings onto the head, returning the new length.
    pub async fn try_lpush_string(&self, key: &str, values: &[&str]) -> CacheResult<i64> {
        let mut conn = self.conn().await?;
        Ok(conn.lpush(key, values).await?)
    }

    /// Head-pushes raw strings. Returns the new length, `-1` on failure.
    pub async fn lpush_string(&self, key: &str, values: &[&str]) -> i64 {
        let result = self.try_lpush_string(key, values).await;
        or_sentinel("LPUSH", key, result, -1)
    }

    /// Pushes integers onto the head, returning the new length.
    pub async fn try_lpush_long(&self, key: &str, values: &[i64]) -> CacheResult<i64> {
        let mut conn = self.conn().await?;
        Ok(conn.lpush(key, values).await?)
    }

    /// Head-pushes integers. Returns the new length, `-1` on failure.
    pub async fn lpush_long(&self, key: &str, values: &[i64]) -> i64 {
        let result = self.try_lpush_long(key, values).await;
        or_sentinel("LPUSH", key, result, -1)
    }

    /// Pushes typed values onto the head, returning the new length.
    pub async fn try_lpush<T: Serialize>(&self, key: &str, values: &[T]) -> CacheResult<i64> {
        let encoded = values
            .iter()
            .map(|v| self.encode(v))
            .collect::<CacheResult<Vec<Vec<u8>>>>()?;
        let mut conn = self.conn().await?;
        Ok(conn.lpush(key, encoded).await?)
    }

    /// Head-pushes typed values. Returns the new length, `-1` on failure.
    pub async fn lpush<T: Serialize>(&self, key: &str, values: &[T]) -> i64 {
        let result = self.try_lpush(key, values).await;
        or_sentinel("LPUSH", key, result, -1)
    }

    /// Head-pushes a raw string only if the list already exists.
    pub async fn try_lpushx_string(&self, key: &str, value: &str) -> CacheResult<i64> {
        let mut conn = self.conn().await?;
        Ok(conn.lpush_exists(key, value).await?)
    }

    /// Conditional head-push. Returns the new length (`0` when the list
    /// does not exist), `-1` on failure.
    pub async fn lpushx_string(&self, key: &str, value: &str) -> i64 {
        let result = self.try_lpushx_string(key, value).await;
        or_sentinel("LPUSHX", key, result, -1)
    }

    /// Head-pushes an integer only if the list already exists.
    pub async fn try_lpushx_long(&self, key: &str, value: i64) -> CacheResult<i64> {
        let mut conn = self.conn().await?;
        Ok(conn.lpush_exists(key, value).await?)
    }

    /// Conditional integer head-push. Returns the new length or `0`/`-1`.
    pub async fn lpushx_long(&self, key: &str, value: i64) -> i64 {
        let result = self.try_lpushx_long(key, value).await;
        or_sentinel("LPUSHX", key, result, -1)
    }

    /// Head-pushes a typed value only if the list already exists.
    pub async fn try_lpushx<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
    ) -> CacheResult<i64> {
        let encoded = self.encode(value)?;
        let mut conn = self.conn().await?;
        Ok(conn.lpush_exists(key, encoded).await?)
    }

    /// Conditional typed head-push. Returns the new length or `0`/`-1`.
    pub async fn lpushx<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> i64 {
        let result = self.try_lpushx(key, value).await;
        or_sentinel("LPUSHX", key, result, -1)
    }

    /// Pushes raw strings onto the tail, returning the new length.
    pub async fn try_rpush_string(&self, key: &str, values: &[&str]) -> CacheResult<i64> {
        let mut conn = self.conn().await?;
        Ok(conn.rpush(key, values).await?)
    }

    /// Tail-pushes raw strings. Returns the new length, `-1` on failure.
    pub async fn rpush_string(&self, key: &str, values: &[&str]) -> i64 {
        let result = self.try_rpush_string(key, values).await;
        or_sentinel("RPUSH", key, result, -1)
    }

    /// Pushes integers onto the tail, returning the new length.
    pub async fn try_rpush_long(&self, key: &str, values: &[i64]) -> CacheResult<i64> {
        let mut conn = self.conn().await?;
        Ok(conn.rpush(key, values).await?)
    }

    /// Tail-pushes integers. Returns the new length, `-1` on failure.
    pub async fn rpush_long(&self, key: &str, values: &[i64]) -> i64 {
        let result = self.try_rpush_long(key, values).await;
        or_sentinel("RPUSH", key, result, -1)
    }

    /// Pushes typed values onto the tail, returning the new length.
    pub async fn try_rpush<T: Serialize>(&self, key: &str, values: &[T]) -> CacheResult<i64> {
        let encoded = values
            .iter()
            .map(|v| self.encode(v))
            .collect::<CacheResult<Vec<Vec<u8>>>>()?;
        let mut conn = self.conn().await?;
        Ok(conn.rpush(key, encoded).await?)
    }

    /// Tail-pushes typed values. Returns the new length, `-1` on failure.
    pub async fn rpush<T: Serialize>(&self, key: &str, values: &[T]) -> i64 {
        let result = self.try_rpush(key, values).await;
        or_sentinel("RPUSH", key, result, -1)
    }

    /// Tail-pushes a raw string only if the list already exists.
    pub async fn try_rpushx_string(&self, key: &str, value: &str) -> CacheResult<i64> {
        let mut conn = self.conn().await?;
        Ok(conn.rpush_exists(key, value).await?)
    }

    /// Conditional tail-push. Returns the new length or `0`/`-1`.
    pub async fn rpushx_string(&self, key: &str, value: &str) -> i64 {
        let result = self.try_rpushx_string(key, value).await;
        or_sentinel("RPUSHX", key, result, -1)
    }

    /// Tail-pushes an integer only if the list already exists.
    pub async fn try_rpushx_long(&self, key: &str, value: i64) -> CacheResult<i64> {
        let mut conn = self.conn().await?;
        Ok(conn.rpush_exists(key, value).await?)
    }

    /// Conditional integer tail-push. Returns the new length or `0`/`-1`.
    pub async fn rpushx_long(&self, key: &str, value: i64) -> i64 {
        let result = self.try_rpushx_long(key, value).await;
        or_sentinel("RPUSHX", key, result, -1)
    }

    /// Tail-pushes a typed value only if the list already exists.
    pub async fn try_rpushx<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
    ) -> CacheResult<i64> {
        let encoded = self.encode(value)?;
        let mut conn = self.conn().await?;
        Ok(conn.rpush_exists(key, encoded).await?)
    }

    /// Conditional typed tail-push. Returns the new length or `0`/`-1`.
    pub async fn rpushx<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> i64 {
        let result = self.try_rpushx(key, value).await;
        or_sentinel("RPUSHX", key, result, -1)
    }

    // ---- ranges -------------------------------------------------------

    /// Reads the elements between `start` and `stop` inclusive, in list
    /// order. Negative indices count from the tail.
    pub async fn try_lrange_string(
        &self,
        key: &str,
        start: isize,
        stop: isize,
    ) -> CacheResult<Vec<String>> {
        let mut conn = self.conn().await?;
        Ok(conn.lrange(key, start, stop).await?)
    }

    /// Range read as raw strings. `None` on failure.
    pub async fn lrange_string(&self, key: &str, start: isize, stop: isize) -> Option<Vec<String>> {
        let result = self.try_lrange_string(key, start, stop).await.map(Some);
        or_sentinel("LRANGE", key, result, None)
    }

    /// Range read as integers. Any unparsable stored value fails the
    /// whole call.
    pub async fn try_lrange_long(
        &self,
        key: &str,
        start: isize,
        stop: isize,
    ) -> CacheResult<Vec<i64>> {
        let mut conn = self.conn().await?;
        let raw: Vec<String> = conn.lrange(key, start, stop).await?;
        raw.iter().map(|v| parse_i64(v)).collect()
    }

    /// Range read as integers. `None` on failure.
    pub async fn lrange_long(&self, key: &str, start: isize, stop: isize) -> Option<Vec<i64>> {
        let result = self.try_lrange_long(key, start, stop).await.map(Some);
        or_sentinel("LRANGE", key, result, None)
    }

    /// Range read as typed values. Any undecodable payload fails the
    /// whole call.
    pub async fn try_lrange<T: DeserializeOwned>(
        &self,
        key: &str,
        start: isize,
        stop: isize,
    ) -> CacheResult<Vec<T>> {
        let mut conn = self.conn().await?;
        let raw: Vec<Vec<u8>> = conn.lrange(key, start, stop).await?;
        self.decode_vec(raw)
    }

    /// Range read as typed values. `None` on failure.
    pub async fn lrange<T: DeserializeOwned>(
        &self,
        key: &str,
        start: isize,
        stop: isize,
    ) -> Option<Vec<T>> {
        let result = self.try_lrange(key, start, stop).await.map(Some);
        or_sentinel("LRANGE", key, result, None)
    }

    // ---- removals and in-place writes ---------------------------------

    /// Removes up to `count` occurrences of a raw string value, returning
    /// the number removed. A zero count removes all occurrences; a
    /// negative count scans from the tail.
    pub async fn try_lrem_string(&self, key: &str, count: isize, value: &str) -> CacheResult<i64> {
        let mut conn = self.conn().await?;
        Ok(conn.lrem(key, count, value).await?)
    }

    /// Removes raw string occurrences. Returns the number removed, `-1`
    /// on failure.
    pub async fn lrem_string(&self, key: &str, count: isize, value: &str) -> i64 {
        let result = self.try_lrem_string(key, count, value).await;
        or_sentinel("LREM", key, result, -1)
    }

    /// Removes up to `count` occurrences of an integer value.
    pub async fn try_lrem_long(&self, key: &str, count: isize, value: i64) -> CacheResult<i64> {
        let mut conn = self.conn().await?;
        Ok(conn.lrem(key, count, value).await?)
    }

    /// Removes integer occurrences. Returns the number removed, `-1` on
    /// failure.
    pub async fn lrem_long(&self, key: &str, count: isize, value: i64) -> i64 {
        let result = self.try_lrem_long(key, count, value).await;
        or_sentinel("LREM", key, result, -1)
    }

    /// Removes up to `count` occurrences of a typed value. Matching is on
    /// the encoded bytes, so it requires the serializer to be
    /// deterministic for equal values.
    pub async fn try_lrem<T: Serialize + ?Sized>(
        &self,
        key: &str,
        count: isize,
        value: &T,
    ) -> CacheResult<i64> {
        let encoded = self.encode(value)?;
        let mut conn = self.conn().await?;
        Ok(conn.lrem(key, count, encoded).await?)
    }

    /// Removes typed occurrences. Returns the number removed, `-1` on
    /// failure.
    pub async fn lrem<T: Serialize + ?Sized>(&self, key: &str, count: isize, value: &T) -> i64 {
        let result = self.try_lrem(key, count, value).await;
        or_sentinel("LREM", key, result, -1)
    }

    /// Overwrites the element at `index` with a raw string. Out-of-range
    /// indices are a command error.
    pub async fn try_lset_string(&self, key: &str, index: isize, value: &str) -> CacheResult<()> {
        let mut conn = self.conn().await?;
        let _: () = conn.lset(key, index, value).await?;
        Ok(())
    }

    /// Overwrites at `index` with a raw string. Returns `0`/`-1`.
    pub async fn lset_string(&self, key: &str, index: isize, value: &str) -> i64 {
        let result = self.try_lset_string(key, index, value).await.map(|()| 0);
        or_sentinel("LSET", key, result, -1)
    }

    /// Overwrites the element at `index` with an integer.
    pub async fn try_lset_long(&self, key: &str, index: isize, value: i64) -> CacheResult<()> {
        let mut conn = self.conn().await?;
        let _: () = conn.lset(key, index, value).await?;
        Ok(())
    }

    /// Overwrites at `index` with an integer. Returns `0`/`-1`.
    pub async fn lset_long(&self, key: &str, index: isize, value: i64) -> i64 {
        let result = self.try_lset_long(key, index, value).await.map(|()| 0);
        or_sentinel("LSET", key, result, -1)
    }

    /// Overwrites the element at `index` with a typed value.
    pub async fn try_lset<T: Serialize + ?Sized>(
        &self,
        key: &str,
        index: isize,
        value: &T,
    ) -> CacheResult<()> {
        let encoded = self.encode(value)?;
        let mut conn = self.conn().await?;
        let _: () = conn.lset(key, index, encoded).await?;
        Ok(())
    }

    /// Overwrites at `index` with a typed value. Returns `0`/`-1`.
    pub async fn lset<T: Serialize + ?Sized>(&self, key: &str, index: isize, value: &T) -> i64 {
        let result = self.try_lset(key, index, value).await.map(|()| 0);
        or_sentinel("LSET", key, result, -1)
    }

    /// Trims the list to the elements between `start` and `stop`
    /// inclusive.
    pub async fn try_ltrim(&self, key: &str, start: isize, stop: isize) -> CacheResult<()> {
        let mut conn = self.conn().await?;
        let _: () = conn.ltrim(key, start, stop).await?;
        Ok(())
    }

    /// Trims the list. Returns `0` on success, `-1` on failure.
    pub async fn ltrim(&self, key: &str, start: isize, stop: isize) -> i64 {
        let result = self.try_ltrim(key, start, stop).await.map(|()| 0);
        or_sentinel("LTRIM", key, result, -1)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::CacheConfig;
    use crate::facade::RedisCache;
    use crate::pool::create_pool;

    // A pool on a closed port fails every acquisition fast, exercising
    // the sentinel conversion without a server.
    fn unreachable_cache() -> RedisCache {
        let config = CacheConfig {
            port: 1,
            ..CacheConfig::default()
        };
        RedisCache::new(create_pool(&config).unwrap())
    }

    #[tokio::test]
    async fn test_lindex_long_failure_defaults_to_zero() {
        let cache = unreachable_cache();
        assert_eq!(cache.lindex_long("numbers", 0).await, 0);
    }

    #[tokio::test]
    async fn test_lindex_long_or_failure_uses_explicit_default() {
        let cache = unreachable_cache();
        assert_eq!(cache.lindex_long_or("numbers", 0, 77).await, 77);
    }

    #[tokio::test]
    async fn test_rpop_long_or_failure_uses_explicit_default() {
        let cache = unreachable_cache();
        assert_eq!(cache.rpop_long_or("numbers", 77).await, 77);
    }

    #[tokio::test]
    async fn test_lpop_long_or_failure_uses_explicit_default() {
        let cache = unreachable_cache();
        assert_eq!(cache.lpop_long_or("numbers", 77).await, 77);
    }
}
