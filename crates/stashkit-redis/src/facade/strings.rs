//! Scalar operations in raw-string, integer, and typed-object variants.
//!
//! All three variants address the same logical key slot. Integer values
//! are stored as decimal strings, so `get_string` and `get_long` see the
//! same bytes; typed values are stored as serializer output and must not
//! be mixed with the other two representations on one key.

use super::{or_sentinel, parse_opt_i64, zip_ordered, RedisCache};
use redis::AsyncCommands;
use serde::de::DeserializeOwned;
use serde::Serialize;
use stashkit_core::{BinarySerializer, CacheResult};

impl<S: BinarySerializer> RedisCache<S> {
    // ---- append / atomic counters -------------------------------------

    /// Appends to a string value, returning the resulting length.
    pub async fn try_append(&self, key: &str, value: &str) -> CacheResult<i64> {
        let mut conn = self.conn().await?;
        Ok(conn.append(key, value).await?)
    }

    /// Appends to a string value. Returns the resulting length, `-1` on
    /// failure.
    pub async fn append(&self, key: &str, value: &str) -> i64 {
        let result = self.try_append(key, value).await;
        or_sentinel("APPEND", key, result, -1)
    }

    /// Atomically increments by one, returning the new value.
    pub async fn try_incr(&self, key: &str) -> CacheResult<i64> {
        let mut conn = self.conn().await?;
        Ok(conn.incr(key, 1i64).await?)
    }

    /// Atomically increments by one. Returns the new value, or
    /// `value_of_err` on failure.
    pub async fn incr(&self, key: &str, value_of_err: i64) -> i64 {
        let result = self.try_incr(key).await;
        or_sentinel("INCR", key, result, value_of_err)
    }

    /// Atomically increments by `by`, returning the new value.
    pub async fn try_incr_by(&self, key: &str, by: i64) -> CacheResult<i64> {
        let mut conn = self.conn().await?;
        Ok(conn.incr(key, by).await?)
    }

    /// Atomically increments by `by`. Returns the new value, or
    /// `value_of_err` on failure.
    pub async fn incr_by(&self, key: &str, by: i64, value_of_err: i64) -> i64 {
        let result = self.try_incr_by(key, by).await;
        or_sentinel("INCRBY", key, result, value_of_err)
    }

    /// Atomically decrements by one, returning the new value.
    pub async fn try_decr(&self, key: &str) -> CacheResult<i64> {
        let mut conn = self.conn().await?;
        Ok(conn.decr(key, 1i64).await?)
    }

    /// Atomically decrements by one. Returns the new value, or
    /// `value_of_err` on failure.
    pub async fn decr(&self, key: &str, value_of_err: i64) -> i64 {
        let result = self.try_decr(key).await;
        or_sentinel("DECR", key, result, value_of_err)
    }

    /// Atomically decrements by `by`, returning the new value.
    pub async fn try_decr_by(&self, key: &str, by: i64) -> CacheResult<i64> {
        let mut conn = self.conn().await?;
        Ok(conn.decr(key, by).await?)
    }

    /// Atomically decrements by `by`. Returns the new value, or
    /// `value_of_err` on failure.
    pub async fn decr_by(&self, key: &str, by: i64, value_of_err: i64) -> i64 {
        let result = self.try_decr_by(key, by).await;
        or_sentinel("DECRBY", key, result, value_of_err)
    }

    // ---- reads --------------------------------------------------------

    /// Reads a raw string value. Absent keys are `Ok(None)`.
    pub async fn try_get_string(&self, key: &str) -> CacheResult<Option<String>> {
        let mut conn = self.conn().await?;
        Ok(conn.get(key).await?)
    }

    /// Reads a raw string. Returns the value, `None` when the key does
    /// not exist, and `None` on failure (the two are conflated; use
    /// [`get_string_or`](Self::get_string_or) or the `try_` form to
    /// distinguish them).
    pub async fn get_string(&self, key: &str) -> Option<String> {
        self.get_string_or(key, None).await
    }

    /// Reads a raw string, returning `value_of_err` on failure instead of
    /// `None`.
    pub async fn get_string_or(&self, key: &str, value_of_err: Option<String>) -> Option<String> {
        let result = self.try_get_string(key).await;
        or_sentinel("GET", key, result, value_of_err)
    }

    /// Reads a raw string and refreshes the key's TTL.
    ///
    /// This is two sequential commands (GET then EXPIRE), not an atomic
    /// pair: a crash or failure between them leaves the expiry unset, and
    /// a concurrent writer can interleave. Accepted limitation.
    pub async fn try_get_string_ex(
        &self,
        key: &str,
        seconds: i64,
    ) -> CacheResult<Option<String>> {
        let mut conn = self.conn().await?;
        let value: Option<String> = conn.get(key).await?;
        let _: bool = conn.expire(key, seconds).await?;
        Ok(value)
    }

    /// Reads a raw string and refreshes the TTL. `None` when absent or on
    /// failure. See [`try_get_string_ex`](Self::try_get_string_ex) for the
    /// non-atomicity caveat.
    pub async fn get_string_ex(&self, key: &str, seconds: i64) -> Option<String> {
        let result = self.try_get_string_ex(key, seconds).await;
        or_sentinel("GET+EXPIRE", key, result, None)
    }

    /// Reads an integer value. Absent keys and empty strings are
    /// `Ok(None)`; a stored value that does not parse as i64 is an
    /// [`IntegerParse`](stashkit_core::CacheError::IntegerParse) error.
    pub async fn try_get_long(&self, key: &str) -> CacheResult<Option<i64>> {
        let mut conn = self.conn().await?;
        let raw: Option<String> = conn.get(key).await?;
        parse_opt_i64(raw)
    }

    /// Reads an integer. Returns the value, `0` when the key does not
    /// exist, and `0` on failure. A legitimately stored zero is
    /// indistinguishable here; use [`get_long_or`](Self::get_long_or) or
    /// the `try_` form when that matters.
    pub async fn get_long(&self, key: &str) -> i64 {
        self.get_long_or(key, 0, 0).await
    }

    /// Reads an integer with explicit defaults for the absent and failure
    /// cases.
    pub async fn get_long_or(&self, key: &str, value_of_not_exist: i64, value_of_err: i64) -> i64 {
        let result = self
            .try_get_long(key)
            .await
            .map(|v| v.unwrap_or(value_of_not_exist));
        or_sentinel("GET", key, result, value_of_err)
    }

    /// Reads an integer and refreshes the TTL. Two sequential commands;
    /// not atomic.
    pub async fn try_get_long_ex(&self, key: &str, seconds: i64) -> CacheResult<Option<i64>> {
        let mut conn = self.conn().await?;
        let raw: Option<String> = conn.get(key).await?;
        let _: bool = conn.expire(key, seconds).await?;
        parse_opt_i64(raw)
    }

    /// Reads an integer and refreshes the TTL. `0` when absent or on
    /// failure.
    pub async fn get_long_ex(&self, key: &str, seconds: i64) -> i64 {
        let result = self
            .try_get_long_ex(key, seconds)
            .await
            .map(Option::unwrap_or_default);
        or_sentinel("GET+EXPIRE", key, result, 0)
    }

    /// Reads a typed value through the serialization boundary. Absent
    /// keys and empty payloads are `Ok(None)`.
    pub async fn try_get<T: DeserializeOwned>(&self, key: &str) -> CacheResult<Option<T>> {
        let mut conn = self.conn().await?;
        let data: Option<Vec<u8>> = conn.get(key).await?;
        self.decode_opt(data)
    }

    /// Reads a typed value. `None` when absent or on failure.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.get_or(key, None).await
    }

    /// Reads a typed value, returning `value_of_err` on failure.
    pub async fn get_or<T: DeserializeOwned>(
        &self,
        key: &str,
        value_of_err: Option<T>,
    ) -> Option<T> {
        let result = self.try_get(key).await;
        or_sentinel("GET", key, result, value_of_err)
    }

    /// Reads a typed value and refreshes the TTL. Two sequential
    /// commands; not atomic.
    pub async fn try_get_ex<T: DeserializeOwned>(
        &self,
        key: &str,
        seconds: i64,
    ) -> CacheResult<Option<T>> {
        let mut conn = self.conn().await?;
        let data: Option<Vec<u8>> = conn.get(key).await?;
        let _: bool = conn.expire(key, seconds).await?;
        self.decode_opt(data)
    }

    /// Reads a typed value and refreshes the TTL. `None` when absent or
    /// on failure.
    pub async fn get_ex<T: DeserializeOwned>(&self, key: &str, seconds: i64) -> Option<T> {
        let result = self.try_get_ex(key, seconds).await;
        or_sentinel("GET+EXPIRE", key, result, None)
    }

    // ---- get-and-set --------------------------------------------------

    /// Atomically sets a raw string and returns the previous value.
    pub async fn try_get_set_string(&self, key: &str, value: &str) -> CacheResult<Option<String>> {
        let mut conn = self.conn().await?;
        Ok(conn.getset(key, value).await?)
    }

    /// Sets a raw string and returns the previous value; `None` when the
    /// key was absent or on failure.
    pub async fn get_set_string(&self, key: &str, value: &str) -> Option<String> {
        self.get_set_string_or(key, value, None).await
    }

    /// Sets a raw string and returns the previous value, with an explicit
    /// failure default.
    pub async fn get_set_string_or(
        &self,
        key: &str,
        value: &str,
        value_of_err: Option<String>,
    ) -> Option<String> {
        let result = self.try_get_set_string(key, value).await;
        or_sentinel("GETSET", key, result, value_of_err)
    }

    /// Atomically sets an integer and returns the previous value.
    pub async fn try_get_set_long(&self, key: &str, value: i64) -> CacheResult<Option<i64>> {
        let mut conn = self.conn().await?;
        let raw: Option<String> = conn.getset(key, value).await?;
        parse_opt_i64(raw)
    }

    /// Sets an integer and returns the previous value; `0` when the key
    /// was absent or on failure.
    pub async fn get_set_long(&self, key: &str, value: i64) -> i64 {
        self.get_set_long_or(key, value, 0).await
    }

    /// Sets an integer and returns the previous value, with an explicit
    /// failure default. An absent pre-image still maps to `0`.
    pub async fn get_set_long_or(&self, key: &str, value: i64, value_of_err: i64) -> i64 {
        let result = self
            .try_get_set_long(key, value)
            .await
            .map(Option::unwrap_or_default);
        or_sentinel("GETSET", key, result, value_of_err)
    }

    /// Atomically sets a typed value and returns the previous one.
    pub async fn try_get_set<T>(&self, key: &str, value: &T) -> CacheResult<Option<T>>
    where
        T: Serialize + DeserializeOwned,
    {
        let encoded = self.encode(value)?;
        let mut conn = self.conn().await?;
        let previous: Option<Vec<u8>> = conn.getset(key, encoded).await?;
        self.decode_opt(previous)
    }

    /// Sets a typed value and returns the previous one; `None` when the
    /// key was absent or on failure.
    pub async fn get_set<T>(&self, key: &str, value: &T) -> Option<T>
    where
        T: Serialize + DeserializeOwned,
    {
        self.get_set_or(key, value, None).await
    }

    /// Sets a typed value and returns the previous one, with an explicit
    /// failure default.
    pub async fn get_set_or<T>(&self, key: &str, value: &T, value_of_err: Option<T>) -> Option<T>
    where
        T: Serialize + DeserializeOwned,
    {
        let result = self.try_get_set(key, value).await;
        or_sentinel("GETSET", key, result, value_of_err)
    }

    // ---- batch reads --------------------------------------------------

    /// Reads several raw strings in one round-trip. The result preserves
    /// the input key order 1:1; absent keys map to `None`. An empty input
    /// short-circuits without touching the pool.
    pub async fn try_mget_string(&self, keys: &[&str]) -> CacheResult<Vec<(String, Option<String>)>> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.conn().await?;
        let values: Vec<Option<String>> = conn.mget(keys).await?;
        Ok(zip_ordered(keys, values))
    }

    /// Batch raw-string read. `None` only when the whole call failed (or
    /// the input was empty), never per entry.
    pub async fn mget_string(&self, keys: &[&str]) -> Option<Vec<(String, Option<String>)>> {
        if keys.is_empty() {
            return None;
        }
        let result = self.try_mget_string(keys).await.map(Some);
        or_sentinel("MGET", keys.first().copied().unwrap_or(""), result, None)
    }

    /// Reads several integers in one round-trip, preserving input order.
    /// Any unparsable stored value fails the whole batch.
    pub async fn try_mget_long(&self, keys: &[&str]) -> CacheResult<Vec<(String, Option<i64>)>> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.conn().await?;
        let raw: Vec<Option<String>> = conn.mget(keys).await?;
        let values = raw
            .into_iter()
            .map(parse_opt_i64)
            .collect::<CacheResult<Vec<Option<i64>>>>()?;
        Ok(zip_ordered(keys, values))
    }

    /// Batch integer read. `None` only on whole-call failure or empty input.
    pub async fn mget_long(&self, keys: &[&str]) -> Option<Vec<(String, Option<i64>)>> {
        if keys.is_empty() {
            return None;
        }
        let result = self.try_mget_long(keys).await.map(Some);
        or_sentinel("MGET", keys.first().copied().unwrap_or(""), result, None)
    }

    /// Reads several typed values in one round-trip, preserving input
    /// order. Any undecodable payload fails the whole batch.
    pub async fn try_mget<T: DeserializeOwned>(
        &self,
        keys: &[&str],
    ) -> CacheResult<Vec<(String, Option<T>)>> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.conn().await?;
        let raw: Vec<Option<Vec<u8>>> = conn.mget(keys).await?;
        let values = raw
            .into_iter()
            .map(|data| self.decode_opt(data))
            .collect::<CacheResult<Vec<Option<T>>>>()?;
        Ok(zip_ordered(keys, values))
    }

    /// Batch typed read. `None` only on whole-call failure or empty input.
    pub async fn mget<T: DeserializeOwned>(
        &self,
        keys: &[&str],
    ) -> Option<Vec<(String, Option<T>)>> {
        if keys.is_empty() {
            return None;
        }
        let result = self.try_mget(keys).await.map(Some);
        or_sentinel("MGET", keys.first().copied().unwrap_or(""), result, None)
    }

    // ---- batch writes -------------------------------------------------

    /// Writes several raw strings in one round-trip.
    pub async fn try_mset_string(&self, pairs: &[(&str, &str)]) -> CacheResult<()> {
        if pairs.is_empty() {
            return Ok(());
        }
        let mut conn = self.conn().await?;
        let _: () = conn.mset(pairs).await?;
        Ok(())
    }

    /// Batch raw-string write. Returns `0` on success (and for an empty
    /// input), `-1` on failure.
    pub async fn mset_string(&self, pairs: &[(&str, &str)]) -> i64 {
        let result = self.try_mset_string(pairs).await.map(|()| 0);
        or_sentinel(
            "MSET",
            pairs.first().map(|(k, _)| *k).unwrap_or(""),
            result,
            -1,
        )
    }

    /// Writes several integers in one round-trip.
    pub async fn try_mset_long(&self, pairs: &[(&str, i64)]) -> CacheResult<()> {
        if pairs.is_empty() {
            return Ok(());
        }
        let mut conn = self.conn().await?;
        let _: () = conn.mset(pairs).await?;
        Ok(())
    }

    /// Batch integer write. Returns `0` on success, `-1` on failure.
    pub async fn mset_long(&self, pairs: &[(&str, i64)]) -> i64 {
        let result = self.try_mset_long(pairs).await.map(|()| 0);
        or_sentinel(
            "MSET",
            pairs.first().map(|(k, _)| *k).unwrap_or(""),
            result,
            -1,
        )
    }

    /// Writes several typed values in one round-trip.
    pub async fn try_mset<T: Serialize>(&self, pairs: &[(&str, T)]) -> CacheResult<()> {
        if pairs.is_empty() {
            return Ok(());
        }
        let encoded = self.encode_pairs(pairs)?;
        let mut conn = self.conn().await?;
        let _: () = conn.mset(&encoded).await?;
        Ok(())
    }

    /// Batch typed write. Returns `0` on success, `-1` on failure.
    pub async fn mset<T: Serialize>(&self, pairs: &[(&str, T)]) -> i64 {
        let result = self.try_mset(pairs).await.map(|()| 0);
        or_sentinel(
            "MSET",
            pairs.first().map(|(k, _)| *k).unwrap_or(""),
            result,
            -1,
        )
    }

    /// Writes several raw strings only if none of the keys exist.
    pub async fn try_mset_nx_string(&self, pairs: &[(&str, &str)]) -> CacheResult<bool> {
        if pairs.is_empty() {
            return Ok(false);
        }
        let mut conn = self.conn().await?;
        Ok(conn.mset_nx(pairs).await?)
    }

    /// Conditional batch raw-string write. Returns `1` when all keys were
    /// set, `0` when at least one already existed (or the input was
    /// empty), `-1` on failure.
    pub async fn mset_nx_string(&self, pairs: &[(&str, &str)]) -> i64 {
        let result = self.try_mset_nx_string(pairs).await.map(i64::from);
        or_sentinel(
            "MSETNX",
            pairs.first().map(|(k, _)| *k).unwrap_or(""),
            result,
            -1,
        )
    }

    /// Writes several integers only if none of the keys exist.
    pub async fn try_mset_nx_long(&self, pairs: &[(&str, i64)]) -> CacheResult<bool> {
        if pairs.is_empty() {
            return Ok(false);
        }
        let mut conn = self.conn().await?;
        Ok(conn.mset_nx(pairs).await?)
    }

    /// Conditional batch integer write. Returns `1`/`0`/`-1`.
    pub async fn mset_nx_long(&self, pairs: &[(&str, i64)]) -> i64 {
        let result = self.try_mset_nx_long(pairs).await.map(i64::from);
        or_sentinel(
            "MSETNX",
            pairs.first().map(|(k, _)| *k).unwrap_or(""),
            result,
            -1,
        )
    }

    /// Writes several typed values only if none of the keys exist.
    pub async fn try_mset_nx<T: Serialize>(&self, pairs: &[(&str, T)]) -> CacheResult<bool> {
        if pairs.is_empty() {
            return Ok(false);
        }
        let encoded = self.encode_pairs(pairs)?;
        let mut conn = self.conn().await?;
        Ok(conn.mset_nx(&encoded).await?)
    }

    /// Conditional batch typed write. Returns `1`/`0`/`-1`.
    pub async fn mset_nx<T: Serialize>(&self, pairs: &[(&str, T)]) -> i64 {
        let result = self.try_mset_nx(pairs).await.map(i64::from);
        or_sentinel(
            "MSETNX",
            pairs.first().map(|(k, _)| *k).unwrap_or(""),
            result,
            -1,
        )
    }

    // ---- single writes ------------------------------------------------

    /// Writes a raw string.
    pub async fn try_set_string(&self, key: &str, value: &str) -> CacheResult<()> {
        let mut conn = self.conn().await?;
        let _: () = conn.set(key, value).await?;
        Ok(())
    }

    /// Writes a raw string. Returns `0` on success, `-1` on failure.
    pub async fn set_string(&self, key: &str, value: &str) -> i64 {
        let result = self.try_set_string(key, value).await.map(|()| 0);
        or_sentinel("SET", key, result, -1)
    }

    /// Writes an integer (stored as a decimal string).
    pub async fn try_set_long(&self, key: &str, value: i64) -> CacheResult<()> {
        let mut conn = self.conn().await?;
        let _: () = conn.set(key, value).await?;
        Ok(())
    }

    /// Writes an integer. Returns `0` on success, `-1` on failure.
    pub async fn set_long(&self, key: &str, value: i64) -> i64 {
        let result = self.try_set_long(key, value).await.map(|()| 0);
        or_sentinel("SET", key, result, -1)
    }

    /// Writes a typed value through the serialization boundary.
    pub async fn try_set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> CacheResult<()> {
        let encoded = self.encode(value)?;
        let mut conn = self.conn().await?;
        let _: () = conn.set(key, encoded).await?;
        Ok(())
    }

    /// Writes a typed value. Returns `0` on success, `-1` on failure.
    pub async fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> i64 {
        let result = self.try_set(key, value).await.map(|()| 0);
        or_sentinel("SET", key, result, -1)
    }

    /// Writes a raw string with a TTL in seconds, as one command.
    pub async fn try_set_ex_string(
        &self,
        key: &str,
        value: &str,
        seconds: u64,
    ) -> CacheResult<()> {
        let mut conn = self.conn().await?;
        let _: () = conn.set_ex(key, value, seconds).await?;
        Ok(())
    }

    /// Writes a raw string with a TTL. Returns `0`/`-1`.
    pub async fn set_ex_string(&self, key: &str, value: &str, seconds: u64) -> i64 {
        let result = self.try_set_ex_string(key, value, seconds).await.map(|()| 0);
        or_sentinel("SETEX", key, result, -1)
    }

    /// Writes an integer with a TTL in seconds.
    pub async fn try_set_ex_long(&self, key: &str, value: i64, seconds: u64) -> CacheResult<()> {
        let mut conn = self.conn().await?;
        let _: () = conn.set_ex(key, value, seconds).await?;
        Ok(())
    }

    /// Writes an integer with a TTL. Returns `0`/`-1`.
    pub async fn set_ex_long(&self, key: &str, value: i64, seconds: u64) -> i64 {
        let result = self.try_set_ex_long(key, value, seconds).await.map(|()| 0);
        or_sentinel("SETEX", key, result, -1)
    }

    /// Writes a typed value with a TTL in seconds.
    pub async fn try_set_ex<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        seconds: u64,
    ) -> CacheResult<()> {
        let encoded = self.encode(value)?;
        let mut conn = self.conn().await?;
        let _: () = conn.set_ex(key, encoded, seconds).await?;
        Ok(())
    }

    /// Writes a typed value with a TTL. Returns `0`/`-1`.
    pub async fn set_ex<T: Serialize + ?Sized>(&self, key: &str, value: &T, seconds: u64) -> i64 {
        let result = self.try_set_ex(key, value, seconds).await.map(|()| 0);
        or_sentinel("SETEX", key, result, -1)
    }

    /// Writes a raw string with a TTL in milliseconds.
    pub async fn try_pset_ex_string(
        &self,
        key: &str,
        value: &str,
        milliseconds: u64,
    ) -> CacheResult<()> {
        let mut conn = self.conn().await?;
        let _: () = conn.pset_ex(key, value, milliseconds).await?;
        Ok(())
    }

    /// Writes a raw string with a millisecond TTL. Returns `0`/`-1`.
    pub async fn pset_ex_string(&self, key: &str, value: &str, milliseconds: u64) -> i64 {
        let result = self
            .try_pset_ex_string(key, value, milliseconds)
            .await
            .map(|()| 0);
        or_sentinel("PSETEX", key, result, -1)
    }

    /// Writes an integer with a TTL in milliseconds.
    pub async fn try_pset_ex_long(
        &self,
        key: &str,
        value: i64,
        milliseconds: u64,
    ) -> CacheResult<()> {
        let mut conn = self.conn().await?;
        let _: () = conn.pset_ex(key, value, milliseconds).await?;
        Ok(())
    }

    /// Writes an integer with a millisecond TTL. Returns `0`/`-1`.
    pub async fn pset_ex_long(&self, key: &str, value: i64, milliseconds: u64) -> i64 {
        let result = self
            .try_pset_ex_long(key, value, milliseconds)
            .await
            .map(|()| 0);
        or_sentinel("PSETEX", key, result, -1)
    }

    /// Writes a typed value with a TTL in milliseconds.
    pub async fn try_pset_ex<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        milliseconds: u64,
    ) -> CacheResult<()> {
        let encoded = self.encode(value)?;
        let mut conn = self.conn().await?;
        let _: () = conn.pset_ex(key, encoded, milliseconds).await?;
        Ok(())
    }

    /// Writes a typed value with a millisecond TTL. Returns `0`/`-1`.
    pub async fn pset_ex<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        milliseconds: u64,
    ) -> i64 {
        let result = self.try_pset_ex(key, value, milliseconds).await.map(|()| 0);
        or_sentinel("PSETEX", key, result, -1)
    }

    /// Writes a raw string only if the key does not exist.
    pub async fn try_set_nx_string(&self, key: &str, value: &str) -> CacheResult<bool> {
        let mut conn = self.conn().await?;
        Ok(conn.set_nx(key, value).await?)
    }

    /// Conditional raw-string write. Returns `1` if the key was set, `0`
    /// if it already existed, `-1` on failure.
    pub async fn set_nx_string(&self, key: &str, value: &str) -> i64 {
        let result = self.try_set_nx_string(key, value).await.map(i64::from);
        or_sentinel("SETNX", key, result, -1)
    }

    /// Writes an integer only if the key does not exist.
    pub async fn try_set_nx_long(&self, key: &str, value: i64) -> CacheResult<bool> {
        let mut conn = self.conn().await?;
        Ok(conn.set_nx(key, value).await?)
    }

    /// Conditional integer write. Returns `1`/`0`/`-1`.
    pub async fn set_nx_long(&self, key: &str, value: i64) -> i64 {
        let result = self.try_set_nx_long(key, value).await.map(i64::from);
        or_sentinel("SETNX", key, result, -1)
    }

    /// Writes a typed value only if the key does not exist.
    pub async fn try_set_nx<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
    ) -> CacheResult<bool> {
        let encoded = self.encode(value)?;
        let mut conn = self.conn().await?;
        Ok(conn.set_nx(key, encoded).await?)
    }

    /// Conditional typed write. Returns `1`/`0`/`-1`.
    pub async fn set_nx<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> i64 {
        let result = self.try_set_nx(key, value).await.map(i64::from);
        or_sentinel("SETNX", key, result, -1)
    }
}
