//! The Redis cache facade.
//!
//! Every public operation reduces to the same shape: borrow one connection
//! from the pool, run exactly one store command (the documented `*_ex`
//! helpers run two), and return the connection on every exit path. Release
//! is the pooled connection's `Drop`, so a decode failure after the command
//! has executed can never leak the connection.
//!
//! Each operation is exposed in two layers:
//! - `try_<op>` returns [`CacheResult`] and is the recommended surface;
//!   "absent" is an `Ok` value (`None`, `0`, an empty collection) and
//!   failures are `Err`.
//! - `<op>` is the sentinel-returning compatibility surface. Any error is
//!   converted at a single chokepoint into the operation family's error
//!   default, so callers never see an `Err`. The fixed-default forms
//!   frequently conflate "absent" with "failed"; use the `*_or` forms or
//!   the `try_` layer when the distinction matters.
//!
//! The facade holds no state beyond the pool and the serializer; keys,
//! values, and fields are owned entirely by the store.

mod hashes;
mod keys;
mod lists;
mod sets;
mod strings;
mod zsets;

use deadpool_redis::{Connection, Pool};
use serde::de::DeserializeOwned;
use serde::Serialize;
use stashkit_core::{BinarySerializer, CacheError, CacheResult, JsonSerializer};
use tracing::warn;

/// Typed cache-access facade over a pooled Redis connection.
///
/// Cheap to share behind an `Arc`; each call borrows exactly one
/// connection for its own exclusive use and returns it before completing.
pub struct RedisCache<S: BinarySerializer = JsonSerializer> {
    pool: Pool,
    serializer: S,
}

impl RedisCache<JsonSerializer> {
    /// Creates a facade with the default JSON serializer for typed values.
    pub fn new(pool: Pool) -> Self {
        Self::with_serializer(pool, JsonSerializer::new())
    }
}

impl<S: BinarySerializer> RedisCache<S> {
    /// Creates a facade with a custom serializer for typed values.
    pub fn with_serializer(pool: Pool, serializer: S) -> Self {
        Self { pool, serializer }
    }

    /// Borrows one connection from the pool, bounded by the pool's wait
    /// and create timeouts.
    pub(crate) async fn conn(&self) -> CacheResult<Connection> {
        Ok(self.pool.get().await?)
    }

    /// Encodes a typed value through the serialization boundary.
    pub(crate) fn encode<T: Serialize + ?Sized>(&self, value: &T) -> CacheResult<Vec<u8>> {
        self.serializer.encode(value)
    }

    /// Decodes a required byte payload.
    pub(crate) fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> CacheResult<T> {
        self.serializer.decode(bytes)
    }

    /// Decodes an optional byte payload; nil and empty payloads are absent.
    pub(crate) fn decode_opt<T: DeserializeOwned>(
        &self,
        data: Option<Vec<u8>>,
    ) -> CacheResult<Option<T>> {
        match data {
            Some(bytes) if !bytes.is_empty() => Ok(Some(self.serializer.decode(&bytes)?)),
            _ => Ok(None),
        }
    }

    /// Decodes a batch of byte payloads, failing the whole batch on the
    /// first undecodable entry.
    pub(crate) fn decode_vec<T: DeserializeOwned>(
        &self,
        data: Vec<Vec<u8>>,
    ) -> CacheResult<Vec<T>> {
        data.iter()
            .map(|bytes| self.serializer.decode(bytes))
            .collect()
    }

    /// Encodes `(key, value)` pairs for a typed batch write.
    pub(crate) fn encode_pairs<T: Serialize>(
        &self,
        pairs: &[(&str, T)],
    ) -> CacheResult<Vec<(String, Vec<u8>)>> {
        pairs
            .iter()
            .map(|(key, value)| Ok(((*key).to_string(), self.serializer.encode(value)?)))
            .collect()
    }
}

/// The sentinel-conversion chokepoint.
///
/// All four failure kinds (pool, command, serialization, parse) funnel
/// through here on the compatibility surface: the error is logged and the
/// family's configured sentinel is substituted. No error propagates.
pub(crate) fn or_sentinel<T>(
    op: &'static str,
    key: &str,
    result: CacheResult<T>,
    sentinel: T,
) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            warn!(op, key, error = %err, "cache operation failed, substituting sentinel");
            sentinel
        }
    }
}

/// Parses a stored representation as i64, mapping failure to
/// [`CacheError::IntegerParse`].
pub(crate) fn parse_i64(raw: &str) -> CacheResult<i64> {
    raw.parse::<i64>()
        .map_err(|_| CacheError::IntegerParse(raw.to_string()))
}

/// Parses an optional stored value as i64. Absent and empty values are
/// both treated as absent, matching the legacy integer accessors.
pub(crate) fn parse_opt_i64(raw: Option<String>) -> CacheResult<Option<i64>> {
    match raw {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => parse_i64(&s).map(Some),
    }
}

/// Zips batch-read results back onto the requested keys, preserving the
/// input order 1:1. Absent entries stay `None`.
pub(crate) fn zip_ordered<V>(keys: &[&str], values: Vec<Option<V>>) -> Vec<(String, Option<V>)> {
    keys.iter()
        .map(|key| (*key).to_string())
        .zip(values)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_or_sentinel_passes_through_success() {
        let result: CacheResult<i64> = Ok(7);
        assert_eq!(or_sentinel("GET", "k", result, -1), 7);
    }

    #[test]
    fn test_or_sentinel_substitutes_on_error() {
        let result: CacheResult<i64> = Err(CacheError::IntegerParse("x".to_string()));
        assert_eq!(or_sentinel("GET", "k", result, -1), -1);
    }

    #[test]
    fn test_parse_i64() {
        assert_eq!(parse_i64("42").unwrap(), 42);
        assert_eq!(parse_i64("-7").unwrap(), -7);
        assert!(matches!(
            parse_i64("4.2"),
            Err(CacheError::IntegerParse(_))
        ));
    }

    #[test]
    fn test_parse_opt_i64_absent_and_empty() {
        assert_eq!(parse_opt_i64(None).unwrap(), None);
        assert_eq!(parse_opt_i64(Some(String::new())).unwrap(), None);
        assert_eq!(parse_opt_i64(Some("9".to_string())).unwrap(), Some(9));
    }

    // The integer hash accessors map an absent field to 0 before the
    // sentinel conversion, so the explicit error default never applies
    // to the absent case.
    #[test]
    fn test_absent_integer_maps_to_zero_ahead_of_error_default() {
        let absent = parse_opt_i64(None).map(Option::unwrap_or_default);
        assert_eq!(or_sentinel("HGET", "k", absent, 99), 0);
    }

    #[test]
    fn test_zip_ordered_preserves_input_order() {
        let zipped = zip_ordered(&["a", "b", "c"], vec![Some(1), None, Some(3)]);
        assert_eq!(
            zipped,
            vec![
                ("a".to_string(), Some(1)),
                ("b".to_string(), None),
                ("c".to_string(), Some(3)),
            ]
        );
    }
}
