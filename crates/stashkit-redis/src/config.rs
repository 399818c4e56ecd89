//! Cache pool configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the Redis connection pool.
///
/// The pool is the only process-wide resource the facade depends on; its
/// sizing and timeout policy live here. Idle-connection eviction is managed
/// internally by deadpool, so only the total bound and the timeout surface
/// are configurable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Redis host.
    #[serde(default = "default_host")]
    pub host: String,

    /// Redis port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Optional password.
    #[serde(default)]
    pub password: Option<String>,

    /// Logical database index.
    #[serde(default)]
    pub db: i64,

    /// Maximum number of pooled connections.
    #[serde(default = "default_max_size")]
    pub max_size: usize,

    /// Pool timeout bounds.
    #[serde(default)]
    pub timeouts: PoolTimeouts,

    /// Key prefix used by the cache-aside lookup.
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            password: None,
            db: 0,
            max_size: default_max_size(),
            timeouts: PoolTimeouts::default(),
            key_prefix: default_key_prefix(),
        }
    }
}

impl CacheConfig {
    /// Builds the `redis://` connection URL for this configuration.
    pub fn url(&self) -> String {
        match &self.password {
            Some(password) => format!(
                "redis://:{}@{}:{}/{}",
                password, self.host, self.port, self.db
            ),
            None => format!("redis://{}:{}/{}", self.host, self.port, self.db),
        }
    }
}

/// Bounds on pool operations. No acquisition blocks indefinitely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolTimeouts {
    /// Maximum time to wait for a free connection, in milliseconds.
    #[serde(default = "default_wait_ms")]
    pub wait_ms: u64,

    /// Maximum time to establish a new connection, in milliseconds.
    #[serde(default = "default_create_ms")]
    pub create_ms: u64,

    /// Maximum time to recycle a returned connection, in milliseconds.
    #[serde(default = "default_recycle_ms")]
    pub recycle_ms: u64,
}

impl Default for PoolTimeouts {
    fn default() -> Self {
        Self {
            wait_ms: default_wait_ms(),
            create_ms: default_create_ms(),
            recycle_ms: default_recycle_ms(),
        }
    }
}

impl PoolTimeouts {
    /// Returns the wait bound as a Duration.
    pub fn wait(&self) -> Duration {
        Duration::from_millis(self.wait_ms)
    }

    /// Returns the create bound as a Duration.
    pub fn create(&self) -> Duration {
        Duration::from_millis(self.create_ms)
    }

    /// Returns the recycle bound as a Duration.
    pub fn recycle(&self) -> Duration {
        Duration::from_millis(self.recycle_ms)
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    6379
}

fn default_max_size() -> usize {
    16
}

fn default_key_prefix() -> String {
    "stashkit".to_string()
}

fn default_wait_ms() -> u64 {
    2_000
}

fn default_create_ms() -> u64 {
    2_000
}

fn default_recycle_ms() -> u64 {
    2_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CacheConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 6379);
        assert_eq!(config.db, 0);
        assert_eq!(config.max_size, 16);
        assert!(config.password.is_none());
    }

    #[test]
    fn test_url_without_password() {
        let config = CacheConfig::default();
        assert_eq!(config.url(), "redis://127.0.0.1:6379/0");
    }

    #[test]
    fn test_url_with_password() {
        let config = CacheConfig {
            password: Some("s3cret".to_string()),
            db: 2,
            ..CacheConfig::default()
        };
        assert_eq!(config.url(), "redis://:s3cret@127.0.0.1:6379/2");
    }

    #[test]
    fn test_timeout_durations() {
        let timeouts = PoolTimeouts::default();
        assert_eq!(timeouts.wait(), Duration::from_millis(2_000));
        assert_eq!(timeouts.create(), Duration::from_millis(2_000));
        assert_eq!(timeouts.recycle(), Duration::from_millis(2_000));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: CacheConfig =
            serde_json::from_str(r#"{"host": "cache.internal", "max_size": 4}"#).unwrap();
        assert_eq!(config.host, "cache.internal");
        assert_eq!(config.max_size, 4);
        assert_eq!(config.port, 6379);
        assert_eq!(config.timeouts.wait_ms, 2_000);
    }
}
