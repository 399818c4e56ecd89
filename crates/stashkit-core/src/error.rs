//! Cache error types.

use thiserror::Error;

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Errors surfaced by the cache facade.
///
/// The sentinel-returning API converts every one of these into the
/// operation family's error default at a single chokepoint; the `try_*`
/// API propagates them as-is.
#[derive(Debug, Error)]
pub enum CacheError {
    /// No usable connection could be borrowed from the pool within the
    /// configured wait bound.
    #[error("connection pool error: {0}")]
    Pool(#[from] deadpool_redis::PoolError),

    /// The store rejected or failed the command (includes network faults).
    #[error("redis command error: {0}")]
    Command(#[from] redis::RedisError),

    /// Encoding or decoding a typed value failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A stored value did not parse as a 64-bit signed integer.
    #[error("stored value is not an integer: {0:?}")]
    IntegerParse(String),

    /// Invalid pool or cache configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Cache-aside lookup missed both the cache and the source of truth.
    #[error("entity not found: {0}")]
    EntityNotFound(String),
}

impl CacheError {
    /// Creates a serialization error.
    pub fn serialization<T: Into<String>>(message: T) -> Self {
        Self::Serialization(message.into())
    }

    /// Creates a configuration error.
    pub fn configuration<T: Into<String>>(message: T) -> Self {
        Self::Configuration(message.into())
    }

    /// Returns true if the error happened before a command was issued.
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Pool(_))
    }

    /// Returns true for failures a caller could plausibly retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Pool(_) | Self::Command(_))
    }
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_constructor() {
        let err = CacheError::serialization("bad payload");
        assert!(err.to_string().contains("bad payload"));
    }

    #[test]
    fn test_configuration_constructor() {
        let err = CacheError::configuration("port out of range");
        assert!(err.to_string().contains("port out of range"));
    }

    #[test]
    fn test_integer_parse_display() {
        let err = CacheError::IntegerParse("abc".to_string());
        assert!(err.to_string().contains("abc"));
    }

    #[test]
    fn test_entity_not_found_is_not_transient() {
        let err = CacheError::EntityNotFound("42".to_string());
        assert!(!err.is_transient());
        assert!(!err.is_connection());
    }

    #[test]
    fn test_serde_json_error_maps_to_serialization() {
        let json_err = serde_json::from_str::<i64>("not a number").unwrap_err();
        let err = CacheError::from(json_err);
        assert!(matches!(err, CacheError::Serialization(_)));
    }

    #[test]
    fn test_integer_parse_is_not_transient() {
        let err = CacheError::IntegerParse("1.5".to_string());
        assert!(!err.is_transient());
    }
}
