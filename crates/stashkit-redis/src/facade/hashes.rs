//! Hash operations in raw-string, integer, and typed-object variants.

use super::{or_sentinel, parse_i64, parse_opt_i64, zip_ordered, RedisCache};
use redis::AsyncCommands;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use stashkit_core::{BinarySerializer, CacheResult};

impl<S: BinarySerializer> RedisCache<S> {
    /// Deletes hash fields, returning the number actually removed.
    pub async fn try_hdel(&self, key: &str, fields: &[&str]) -> CacheResult<i64> {
        let mut conn = self.conn().await?;
        Ok(conn.hdel(key, fields).await?)
    }

    /// Deletes hash fields. Returns the number removed, `-1` on failure.
    pub async fn hdel(&self, key: &str, fields: &[&str]) -> i64 {
        let result = self.try_hdel(key, fields).await;
        or_sentinel("HDEL", key, result, -1)
    }

    /// Checks whether a hash field exists.
    pub async fn try_hexists(&self, key: &str, field: &str) -> CacheResult<bool> {
        let mut conn = self.conn().await?;
        Ok(conn.hexists(key, field).await?)
    }

    /// Checks field existence. Returns `1`/`0`/`-1`.
    pub async fn hexists(&self, key: &str, field: &str) -> i64 {
        let result = self.try_hexists(key, field).await.map(i64::from);
        or_sentinel("HEXISTS", key, result, -1)
    }

    // ---- field reads --------------------------------------------------

    /// Reads a raw string field. Absent fields are `Ok(None)`.
    pub async fn try_hget_string(&self, key: &str, field: &str) -> CacheResult<Option<String>> {
        let mut conn = self.conn().await?;
        Ok(conn.hget(key, field).await?)
    }

    /// Reads a raw string field. `None` when absent or on failure.
    pub async fn hget_string(&self, key: &str, field: &str) -> Option<String> {
        self.hget_string_or(key, field, None).await
    }

    /// Reads a raw string field with an explicit failure default.
    pub async fn hget_string_or(
        &self,
        key: &str,
        field: &str,
        value_of_err: Option<String>,
    ) -> Option<String> {
        let result = self.try_hget_string(key, field).await;
        or_sentinel("HGET", key, result, value_of_err)
    }

    /// Reads an integer field. Absent fields and empty strings are
    /// `Ok(None)`.
    pub async fn try_hget_long(&self, key: &str, field: &str) -> CacheResult<Option<i64>> {
        let mut conn = self.conn().await?;
        let raw: Option<String> = conn.hget(key, field).await?;
        parse_opt_i64(raw)
    }

    /// Reads an integer field. An absent field maps to `0`, as does any
    /// failure.
    pub async fn hget_long(&self, key: &str, field: &str) -> i64 {
        self.hget_long_or(key, field, 0).await
    }

    /// Reads an integer field with an explicit failure default. An absent
    /// field still maps to `0`.
    pub async fn hget_long_or(&self, key: &str, field: &str, value_of_err: i64) -> i64 {
        let result = self
            .try_hget_long(key, field)
            .await
            .map(Option::unwrap_or_default);
        or_sentinel("HGET", key, result, value_of_err)
    }

    /// Reads a typed field. Absent fields and empty payloads are `Ok(None)`.
    pub async fn try_hget<T: DeserializeOwned>(
        &self,
        key: &str,
        field: &str,
    ) -> CacheResult<Option<T>> {
        let mut conn = self.conn().await?;
        let data: Option<Vec<u8>> = conn.hget(key, field).await?;
        self.decode_opt(data)
    }

    /// Reads a typed field. `None` when absent or on failure.
    pub async fn hget<T: DeserializeOwned>(&self, key: &str, field: &str) -> Option<T> {
        let result = self.try_hget(key, field).await;
        or_sentinel("HGET", key, result, None)
    }

    // ---- whole-hash reads ---------------------------------------------

    /// Reads all fields as raw strings. An absent key is an empty map.
    pub async fn try_hget_all_string(&self, key: &str) -> CacheResult<HashMap<String, String>> {
        let mut conn = self.conn().await?;
        Ok(conn.hgetall(key).await?)
    }

    /// Reads all fields as raw strings. `None` on failure.
    pub async fn hget_all_string(&self, key: &str) -> Option<HashMap<String, String>> {
        let result = self.try_hget_all_string(key).await.map(Some);
        or_sentinel("HGETALL", key, result, None)
    }

    /// Reads all fields as integers. Empty stored values map to `0`; any
    /// other unparsable value fails the whole call.
    pub async fn try_hget_all_long(&self, key: &str) -> CacheResult<HashMap<String, i64>> {
        let mut conn = self.conn().await?;
        let raw: HashMap<String, String> = conn.hgetall(key).await?;
        raw.into_iter()
            .map(|(field, value)| {
                let parsed = if value.is_empty() { 0 } else { parse_i64(&value)? };
                Ok((field, parsed))
            })
            .collect()
    }

    /// Reads all fields as integers. `None` on failure.
    pub async fn hget_all_long(&self, key: &str) -> Option<HashMap<String, i64>> {
        let result = self.try_hget_all_long(key).await.map(Some);
        or_sentinel("HGETALL", key, result, None)
    }

    /// Reads all fields as typed values. Any undecodable payload fails
    /// the whole call.
    pub async fn try_hget_all<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> CacheResult<HashMap<String, T>> {
        let mut conn = self.conn().await?;
        let raw: HashMap<String, Vec<u8>> = conn.hgetall(key).await?;
        raw.into_iter()
            .map(|(field, bytes)| Ok((field, self.decode(&bytes)?)))
            .collect()
    }

    /// Reads all fields as typed values. `None` on failure.
    pub async fn hget_all<T: DeserializeOwned>(&self, key: &str) -> Option<HashMap<String, T>> {
        let result = self.try_hget_all(key).await.map(Some);
        or_sentinel("HGETALL", key, result, None)
    }

    // ---- field counters -----------------------------------------------

    /// Atomically increments a field by one, returning the new value.
    pub async fn try_hincr(&self, key: &str, field: &str) -> CacheResult<i64> {
        let mut conn = self.conn().await?;
        Ok(conn.hincr(key, field, 1i64).await?)
    }

    /// Increments a field by one. Returns the new value, or
    /// `value_of_err` on failure.
    pub async fn hincr(&self, key: &str, field: &str, value_of_err: i64) -> i64 {
        let result = self.try_hincr(key, field).await;
        or_sentinel("HINCRBY", key, result, value_of_err)
    }

    /// Atomically decrements a field by one, returning the new value.
    pub async fn try_hdecr(&self, key: &str, field: &str) -> CacheResult<i64> {
        let mut conn = self.conn().await?;
        Ok(conn.hincr(key, field, -1i64).await?)
    }

    /// Decrements a field by one. Returns the new value, or
    /// `value_of_err` on failure.
    pub async fn hdecr(&self, key: &str, field: &str, value_of_err: i64) -> i64 {
        let result = self.try_hdecr(key, field).await;
        or_sentinel("HINCRBY", key, result, value_of_err)
    }

    /// Atomically increments a field by `by`, returning the new value.
    pub async fn try_hincr_by(&self, key: &str, field: &str, by: i64) -> CacheResult<i64> {
        let mut conn = self.conn().await?;
        Ok(conn.hincr(key, field, by).await?)
    }

    /// Increments a field by `by`. Returns the new value, or
    /// `value_of_err` on failure.
    pub async fn hincr_by(&self, key: &str, field: &str, by: i64, value_of_err: i64) -> i64 {
        let result = self.try_hincr_by(key, field, by).await;
        or_sentinel("HINCRBY", key, result, value_of_err)
    }

    // ---- structure queries --------------------------------------------

    /// Lists a hash's field names. An absent key is an empty list.
    pub async fn try_hkeys(&self, key: &str) -> CacheResult<Vec<String>> {
        let mut conn = self.conn().await?;
        Ok(conn.hkeys(key).await?)
    }

    /// Lists field names. `None` on failure.
    pub async fn hkeys(&self, key: &str) -> Option<Vec<String>> {
        let result = self.try_hkeys(key).await.map(Some);
        or_sentinel("HKEYS", key, result, None)
    }

    /// Counts a hash's fields. An absent key counts `0`.
    pub async fn try_hlen(&self, key: &str) -> CacheResult<i64> {
        let mut conn = self.conn().await?;
        Ok(conn.hlen(key).await?)
    }

    /// Counts fields. Returns the count, `-1` on failure.
    pub async fn hlen(&self, key: &str) -> i64 {
        let result = self.try_hlen(key).await;
        or_sentinel("HLEN", key, result, -1)
    }

    // ---- batch field reads --------------------------------------------

    /// Reads several raw string fields in one round-trip, preserving the
    /// input field order 1:1. An empty input short-circuits.
    pub async fn try_hmget_string(
        &self,
        key: &str,
        fields: &[&str],
    ) -> CacheResult<Vec<(String, Option<String>)>> {
        if fields.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.conn().await?;
        let values: Vec<Option<String>> = redis::cmd("HMGET")
            .arg(key)
            .arg(fields)
            .query_async(&mut conn)
            .await?;
        Ok(zip_ordered(fields, values))
    }

    /// Batch raw-string field read. `None` on whole-call failure or empty
    /// input.
    pub async fn hmget_string(
        &self,
        key: &str,
        fields: &[&str],
    ) -> Option<Vec<(String, Option<String>)>> {
        if fields.is_empty() {
            return None;
        }
        let result = self.try_hmget_string(key, fields).await.map(Some);
        or_sentinel("HMGET", key, result, None)
    }

    /// Reads several integer fields in one round-trip, preserving input
    /// order. Any unparsable stored value fails the whole batch.
    pub async fn try_hmget_long(
        &self,
        key: &str,
        fields: &[&str],
    ) -> CacheResult<Vec<(String, Option<i64>)>> {
        if fields.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.conn().await?;
        let raw: Vec<Option<String>> = redis::cmd("HMGET")
            .arg(key)
            .arg(fields)
            .query_async(&mut conn)
            .await?;
        let values = raw
            .into_iter()
            .map(parse_opt_i64)
            .collect::<CacheResult<Vec<Option<i64>>>>()?;
        Ok(zip_ordered(fields, values))
    }

    /// Batch integer field read. `None` on whole-call failure or empty
    /// input.
    pub async fn hmget_long(
        &self,
        key: &str,
        fields: &[&str],
    ) -> Option<Vec<(String, Option<i64>)>> {
        if fields.is_empty() {
            return None;
        }
        let result = self.try_hmget_long(key, fields).await.map(Some);
        or_sentinel("HMGET", key, result, None)
    }

    /// Reads several typed fields in one round-trip, preserving input
    /// order. Any undecodable payload fails the whole batch.
    pub async fn try_hmget<T: DeserializeOwned>(
        &self,
        key: &str,
        fields: &[&str],
    ) -> CacheResult<Vec<(String, Option<T>)>> {
        if fields.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.conn().await?;
        let raw: Vec<Option<Vec<u8>>> = redis::cmd("HMGET")
            .arg(key)
            .arg(fields)
            .query_async(&mut conn)
            .await?;
        let values = raw
            .into_iter()
            .map(|data| self.decode_opt(data))
            .collect::<CacheResult<Vec<Option<T>>>>()?;
        Ok(zip_ordered(fields, values))
    }

    /// Batch typed field read. `None` on whole-call failure or empty input.
    pub async fn hmget<T: DeserializeOwned>(
        &self,
        key: &str,
        fields: &[&str],
    ) -> Option<Vec<(String, Option<T>)>> {
        if fields.is_empty() {
            return None;
        }
        let result = self.try_hmget(key, fields).await.map(Some);
        or_sentinel("HMGET", key, result, None)
    }

    // ---- batch field writes -------------------------------------------

    /// Writes several raw string fields in one round-trip.
    pub async fn try_hmset_string(&self, key: &str, pairs: &[(&str, &str)]) -> CacheResult<()> {
        if pairs.is_empty() {
            return Ok(());
        }
        let mut conn = self.conn().await?;
        let _: () = conn.hset_multiple(key, pairs).await?;
        Ok(())
    }

    /// Batch raw-string field write. Returns `0` on success (and for an
    /// empty input), `-1` on failure.
    pub async fn hmset_string(&self, key: &str, pairs: &[(&str, &str)]) -> i64 {
        let result = self.try_hmset_string(key, pairs).await.map(|()| 0);
        or_sentinel("HMSET", key, result, -1)
    }

    /// Writes several integer fields in one round-trip.
    pub async fn try_hmset_long(&self, key: &str, pairs: &[(&str, i64)]) -> CacheResult<()> {
        if pairs.is_empty() {
            return Ok(());
        }
        let mut conn = self.conn().await?;
        let _: () = conn.hset_multiple(key, pairs).await?;
        Ok(())
    }

    /// Batch integer field write. Returns `0`/`-1`.
    pub async fn hmset_long(&self, key: &str, pairs: &[(&str, i64)]) -> i64 {
        let result = self.try_hmset_long(key, pairs).await.map(|()| 0);
        or_sentinel("HMSET", key, result, -1)
    }

    /// Writes several typed fields in one round-trip.
    pub async fn try_hmset<T: Serialize>(&self, key: &str, pairs: &[(&str, T)]) -> CacheResult<()> {
        if pairs.is_empty() {
            return Ok(());
        }
        let encoded = self.encode_pairs(pairs)?;
        let mut conn = self.conn().await?;
        let _: () = conn.hset_multiple(key, &encoded).await?;
        Ok(())
    }

    /// Batch typed field write. Returns `0`/`-1`.
    pub async fn hmset<T: Serialize>(&self, key: &str, pairs: &[(&str, T)]) -> i64 {
        let result = self.try_hmset(key, pairs).await.map(|()| 0);
        or_sentinel("HMSET", key, result, -1)
    }

    // ---- single field writes ------------------------------------------

    /// Writes a raw string field, returning whether the field was new.
    pub async fn try_hset_string(&self, key: &str, field: &str, value: &str) -> CacheResult<bool> {
        let mut conn = self.conn().await?;
        Ok(conn.hset(key, field, value).await?)
    }

    /// Writes a raw string field. Returns `1` when the field was created,
    /// `0` when an existing field was updated, `-1` on failure.
    pub async fn hset_string(&self, key: &str, field: &str, value: &str) -> i64 {
        let result = self.try_hset_string(key, field, value).await.map(i64::from);
        or_sentinel("HSET", key, result, -1)
    }

    /// Writes an integer field, returning whether the field was new.
    pub async fn try_hset_long(&self, key: &str, field: &str, value: i64) -> CacheResult<bool> {
        let mut conn = self.conn().await?;
        Ok(conn.hset(key, field, value).await?)
    }

    /// Writes an integer field. Returns `1` created / `0` updated / `-1`.
    pub async fn hset_long(&self, key: &str, field: &str, value: i64) -> i64 {
        let result = self.try_hset_long(key, field, value).await.map(i64::from);
        or_sentinel("HSET", key, result, -1)
    }

    /// Writes a typed field, returning whether the field was new.
    pub async fn try_hset<T: Serialize + ?Sized>(
        &self,
        key: &str,
        field: &str,
        value: &T,
    ) -> CacheResult<bool> {
        let encoded = self.encode(value)?;
        let mut conn = self.conn().await?;
        Ok(conn.hset(key, field, encoded).await?)
    }

    /// Writes a typed field. Returns `1` created / `0` updated / `-1`.
    pub async fn hset<T: Serialize + ?Sized>(&self, key: &str, field: &str, value: &T) -> i64 {
        let result = self.try_hset(key, field, value).await.map(i64::from);
        or_sentinel("HSET", key, result, -1)
    }

    /// Writes a raw string field only if it does not exist.
    pub async fn try_hset_nx_string(
        &self,
        key: &str,
        field: &str,
        value: &str,
    ) -> CacheResult<bool> {
        let mut conn = self.conn().await?;
        Ok(conn.hset_nx(key, field, value).await?)
    }

    /// Conditional raw-string field write. Returns `1` set / `0` already
    /// present / `-1`.
    pub async fn hset_nx_string(&self, key: &str, field: &str, value: &str) -> i64 {
        let result = self
            .try_hset_nx_string(key, field, value)
            .await
            .map(i64::from);
        or_sentinel("HSETNX", key, result, -1)
    }

    /// Writes an integer field only if it does not exist.
    pub async fn try_hset_nx_long(&self, key: &str, field: &str, value: i64) -> CacheResult<bool> {
        let mut conn = self.conn().await?;
        Ok(conn.hset_nx(key, field, value).await?)
    }

    /// Conditional integer field write. Returns `1`/`0`/`-1`.
    pub async fn hset_nx_long(&self, key: &str, field: &str, value: i64) -> i64 {
        let result = self
            .try_hset_nx_long(key, field, value)
            .await
            .map(i64::from);
        or_sentinel("HSETNX", key, result, -1)
    }

    /// Writes a typed field only if it does not exist.
    pub async fn try_hset_nx<T: Serialize + ?Sized>(
        &self,
        key: &str,
        field: &str,
        value: &T,
    ) -> CacheResult<bool> {
        let encoded = self.encode(value)?;
        let mut conn = self.conn().await?;
        Ok(conn.hset_nx(key, field, encoded).await?)
    }

    /// Conditional typed field write. Returns `1`/`0`/`-1`.
    pub async fn hset_nx<T: Serialize + ?Sized>(&self, key: &str, field: &str, value: &T) -> i64 {
        let result = self.try_hset_nx(key, field, value).await.map(i64::from);
        or_sentinel("HSETNX", key, result, -1)
    }

    // ---- value listings -----------------------------------------------

    /// Lists a hash's values as raw strings.
    pub async fn try_hvals_string(&self, key: &str) -> CacheResult<Vec<String>> {
        let mut conn = self.conn().await?;
        Ok(conn.hvals(key).await?)
    }

    /// Lists values as raw strings. `None` on failure.
    pub async fn hvals_string(&self, key: &str) -> Option<Vec<String>> {
        let result = self.try_hvals_string(key).await.map(Some);
        or_sentinel("HVALS", key, result, None)
    }

    /// Lists a hash's values as integers. Any unparsable stored value
    /// fails the whole call.
    pub async fn try_hvals_long(&self, key: &str) -> CacheResult<Vec<i64>> {
        let mut conn = self.conn().await?;
        let raw: Vec<String> = conn.hvals(key).await?;
        raw.iter().map(|v| parse_i64(v)).collect()
    }

    /// Lists values as integers. `None` on failure.
    pub async fn hvals_long(&self, key: &str) -> Option<Vec<i64>> {
        let result = self.try_hvals_long(key).await.map(Some);
        or_sentinel("HVALS", key, result, None)
    }

    /// Lists a hash's values as typed objects. Any undecodable payload
    /// fails the whole call.
    pub async fn try_hvals<T: DeserializeOwned>(&self, key: &str) -> CacheResult<Vec<T>> {
        let mut conn = self.conn().await?;
        let raw: Vec<Vec<u8>> = conn.hvals(key).await?;
        self.decode_vec(raw)
    }

    /// Lists values as typed objects. `None` on failure.
    pub async fn hvals<T: DeserializeOwned>(&self, key: &str) -> Option<Vec<T>> {
        let result = self.try_hvals(key).await.map(Some);
        or_sentinel("HVALS", key, result, None)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::CacheConfig;
    use crate::facade::RedisCache;
    use crate::pool::create_pool;

    fn unreachable_cache() -> RedisCache {
        let config = CacheConfig {
            port: 1,
            ..CacheConfig::default()
        };
        RedisCache::new(create_pool(&config).unwrap())
    }

    #[tokio::test]
    async fn test_hget_long_failure_defaults_to_zero() {
        let cache = unreachable_cache();
        assert_eq!(cache.hget_long("user", "age").await, 0);
    }

    #[tokio::test]
    async fn test_hget_long_or_failure_uses_explicit_default() {
        let cache = unreachable_cache();
        assert_eq!(cache.hget_long_or("user", "age", 99).await, 99);
    }
}
