//! Set operations in raw-string, integer, and typed-object variants.

use super::{or_sentinel, parse_opt_i64, RedisCache};
use redis::AsyncCommands;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashSet;
use stashkit_core::{BinarySerializer, CacheResult};

impl<S: BinarySerializer> RedisCache<S> {
    // ---- membership writes --------------------------------------------

    /// Adds raw string members, returning the number newly added.
    pub async fn try_sadd_string(&self, key: &str, members: &[&str]) -> CacheResult<i64> {
        let mut conn = self.conn().await?;
        Ok(conn.sadd(key, members).await?)
    }

    /// Adds raw string members. Returns the number newly added, `-1` on
    /// failure.
    pub async fn sadd_string(&self, key: &str, members: &[&str]) -> i64 {
        let result = self.try_sadd_string(key, members).await;
        or_sentinel("SADD", key, result, -1)
    }

    /// Adds integer members, returning the number newly added.
    pub async fn try_sadd_long(&self, key: &str, members: &[i64]) -> CacheResult<i64> {
        let mut conn = self.conn().await?;
        Ok(conn.sadd(key, members).await?)
    }

    /// Adds integer members. Returns the number newly added, `-1` on
    /// failure.
    pub async fn sadd_long(&self, key: &str, members: &[i64]) -> i64 {
        let result = self.try_sadd_long(key, members).await;
        or_sentinel("SADD", key, result, -1)
    }

    /// Adds typed members, returning the number newly added. Uniqueness
    /// is on the encoded bytes.
    pub async fn try_sadd<T: Serialize>(&self, key: &str, members: &[T]) -> CacheResult<i64> {
        let encoded = members
            .iter()
            .map(|m| self.encode(m))
            .collect::<CacheResult<Vec<Vec<u8>>>>()?;
        let mut conn = self.conn().await?;
        Ok(conn.sadd(key, encoded).await?)
    }

    /// Adds typed members. Returns the number newly added, `-1` on
    /// failure.
    pub async fn sadd<T: Serialize>(&self, key: &str, members: &[T]) -> i64 {
        let result = self.try_sadd(key, members).await;
        or_sentinel("SADD", key, result, -1)
    }

    // ---- queries ------------------------------------------------------

    /// Counts a set's members. An absent key counts `0`.
    pub async fn try_scard(&self, key: &str) -> CacheResult<i64> {
        let mut conn = self.conn().await?;
        Ok(conn.scard(key).await?)
    }

    /// Counts members. Returns the count, `-1` on failure.
    pub async fn scard(&self, key: &str) -> i64 {
        let result = self.try_scard(key).await;
        or_sentinel("SCARD", key, result, -1)
    }

    /// Checks raw string membership.
    pub async fn try_sismember_string(&self, key: &str, member: &str) -> CacheResult<bool> {
        let mut conn = self.conn().await?;
        Ok(conn.sismember(key, member).await?)
    }

    /// Checks raw string membership. Returns `1`/`0`/`-1`.
    pub async fn sismember_string(&self, key: &str, member: &str) -> i64 {
        let result = self.try_sismember_string(key, member).await.map(i64::from);
        or_sentinel("SISMEMBER", key, result, -1)
    }

    /// Checks integer membership.
    pub async fn try_sismember_long(&self, key: &str, member: i64) -> CacheResult<bool> {
        let mut conn = self.conn().await?;
        Ok(conn.sismember(key, member).await?)
    }

    /// Checks integer membership. Returns `1`/`0`/`-1`.
    pub async fn sismember_long(&self, key: &str, member: i64) -> i64 {
        let result = self.try_sismember_long(key, member).await.map(i64::from);
        or_sentinel("SISMEMBER", key, result, -1)
    }

    /// Reads all members as raw strings. An absent key is an empty set.
    pub async fn try_smembers_string(&self, key: &str) -> CacheResult<HashSet<String>> {
        let mut conn = self.conn().await?;
        Ok(conn.smembers(key).await?)
    }

    /// Reads all members as raw strings. `None` on failure.
    pub async fn smembers_string(&self, key: &str) -> Option<HashSet<String>> {
        let result = self.try_smembers_string(key).await.map(Some);
        or_sentinel("SMEMBERS", key, result, None)
    }

    /// Reads all members as integers. Any non-numeric member fails the
    /// whole call.
    pub async fn try_smembers_long(&self, key: &str) -> CacheResult<HashSet<i64>> {
        let mut conn = self.conn().await?;
        Ok(conn.smembers(key).await?)
    }

    /// Reads all members as integers. `None` on failure.
    pub async fn smembers_long(&self, key: &str) -> Option<HashSet<i64>> {
        let result = self.try_smembers_long(key).await.map(Some);
        or_sentinel("SMEMBERS", key, result, None)
    }

    /// Reads all members as typed values. Members come back in store
    /// order, which is unspecified for sets. Any undecodable payload
    /// fails the whole call.
    pub async fn try_smembers<T: DeserializeOwned>(&self, key: &str) -> CacheResult<Vec<T>> {
        let mut conn = self.conn().await?;
        let raw: Vec<Vec<u8>> = conn.smembers(key).await?;
        self.decode_vec(raw)
    }

    /// Reads all members as typed values. `None` on failure.
    pub async fn smembers<T: DeserializeOwned>(&self, key: &str) -> Option<Vec<T>> {
        let result = self.try_smembers(key).await.map(Some);
        or_sentinel("SMEMBERS", key, result, None)
    }

    // ---- random removal and sampling ----------------------------------

    /// Removes and returns a random member. An empty or absent set is
    /// `Ok(None)`.
    pub async fn try_spop_string(&self, key: &str) -> CacheResult<Option<String>> {
        let mut conn = self.conn().await?;
        Ok(conn.spop(key).await?)
    }

    /// Removes a random member. `None` when empty or on failure.
    pub async fn spop_string(&self, key: &str) -> Option<String> {
        let result = self.try_spop_string(key).await;
        or_sentinel("SPOP", key, result, None)
    }

    /// Removes and returns a random integer member.
    pub async fn try_spop_long(&self, key: &str) -> CacheResult<Option<i64>> {
        let mut conn = self.conn().await?;
        let raw: Option<String> = conn.spop(key).await?;
        parse_opt_i64(raw)
    }

    /// Removes a random integer member. An empty set maps to `0`,
    /// failure to `-1`.
    pub async fn spop_long(&self, key: &str) -> i64 {
        self.spop_long_or(key, -1).await
    }

    /// Removes a random integer member with an explicit failure default.
    /// An empty set still maps to `0`.
    pub async fn spop_long_or(&self, key: &str, value_of_err: i64) -> i64 {
        let result = self
            .try_spop_long(key)
            .await
            .map(Option::unwrap_or_default);
        or_sentinel("SPOP", key, result, value_of_err)
    }

    /// Removes and returns a random typed member.
    pub async fn try_spop<T: DeserializeOwned>(&self, key: &str) -> CacheResult<Option<T>> {
        let mut conn = self.conn().await?;
        let data: Option<Vec<u8>> = conn.spop(key).await?;
        self.decode_opt(data)
    }

    /// Removes a random typed member. `None` when empty or on failure.
    pub async fn spop<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let result = self.try_spop(key).await;
        or_sentinel("SPOP", key, result, None)
    }

    /// Returns a random member without removing it.
    pub async fn try_srandmember_string(&self, key: &str) -> CacheResult<Option<String>> {
        let mut conn = self.conn().await?;
        Ok(conn.srandmember(key).await?)
    }

    /// Samples a random member. `None` when empty or on failure.
    pub async fn srandmember_string(&self, key: &str) -> Option<String> {
        let result = self.try_srandmember_string(key).await;
        or_sentinel("SRANDMEMBER", key, result, None)
    }

    /// Returns a random integer member without removing it.
    pub async fn try_srandmember_long(&self, key: &str) -> CacheResult<Option<i64>> {
        let mut conn = self.conn().await?;
        let raw: Option<String> = conn.srandmember(key).await?;
        parse_opt_i64(raw)
    }

    /// Samples a random integer member. An empty set maps to `0`,
    /// failure to `-1`.
    pub async fn srandmember_long(&self, key: &str) -> i64 {
        let result = self
            .try_srandmember_long(key)
            .await
            .map(Option::unwrap_or_default);
        or_sentinel("SRANDMEMBER", key, result, -1)
    }

    /// Returns up to `count` distinct random members without removal.
    pub async fn try_srandmembers_string(
        &self,
        key: &str,
        count: usize,
    ) -> CacheResult<Vec<String>> {
        let mut conn = self.conn().await?;
        Ok(conn.srandmember_multiple(key, count).await?)
    }

    /// Samples up to `count` members. `None` on failure.
    pub async fn srandmembers_string(&self, key: &str, count: usize) -> Option<Vec<String>> {
        let result = self.try_srandmembers_string(key, count).await.map(Some);
        or_sentinel("SRANDMEMBER", key, result, None)
    }

    /// Returns up to `count` distinct random integer members. Any
    /// non-numeric member fails the whole call.
    pub async fn try_srandmembers_long(&self, key: &str, count: usize) -> CacheResult<Vec<i64>> {
        let mut conn = self.conn().await?;
        Ok(conn.srandmember_multiple(key, count).await?)
    }

    /// Samples up to `count` integer members. `None` on failure.
    pub async fn srandmembers_long(&self, key: &str, count: usize) -> Option<Vec<i64>> {
        let result = self.try_srandmembers_long(key, count).await.map(Some);
        or_sentinel("SRANDMEMBER", key, result, None)
    }

    // ---- removals -----------------------------------------------------

    /// Removes raw string members, returning the number actually removed.
    pub async fn try_srem_string(&self, key: &str, members: &[&str]) -> CacheResult<i64> {
        let mut conn = self.conn().await?;
        Ok(conn.srem(key, members).await?)
    }

    /// Removes raw string members. Returns the number removed, `-1` on
    /// failure.
    pub async fn srem_string(&self, key: &str, members: &[&str]) -> i64 {
        let result = self.try_srem_string(key, members).await;
        or_sentinel("SREM", key, result, -1)
    }

    /// Removes integer members, returning the number actually removed.
    pub async fn try_srem_long(&self, key: &str, members: &[i64]) -> CacheResult<i64> {
        let mut conn = self.conn().await?;
        Ok(conn.srem(key, members).await?)
    }

    /// Removes integer members. Returns the number removed, `-1` on
    /// failure.
    pub async fn srem_long(&self, key: &str, members: &[i64]) -> i64 {
        let result = self.try_srem_long(key, members).await;
        or_sentinel("SREM", key, result, -1)
    }

    /// Removes typed members, matching on the encoded bytes.
    pub async fn try_srem<T: Serialize>(&self, key: &str, members: &[T]) -> CacheResult<i64> {
        let encoded = members
            .iter()
            .map(|m| self.encode(m))
            .collect::<CacheResult<Vec<Vec<u8>>>>()?;
        let mut conn = self.conn().await?;
        Ok(conn.srem(key, encoded).await?)
    }

    /// Removes typed members. Returns the number removed, `-1` on
    /// failure.
    pub async fn srem<T: Serialize>(&self, key: &str, members: &[T]) -> i64 {
        let result = self.try_srem(key, members).await;
        or_sentinel("SREM", key, result, -1)
    }
}
