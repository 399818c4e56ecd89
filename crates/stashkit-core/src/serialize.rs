//! Binary serialization boundary for typed cache values.
//!
//! Typed-object operations on the facade route every value through this
//! trait before and after the store call. The type descriptor is the Rust
//! generic parameter itself; callers are responsible for using a consistent
//! type per key, since decoding bytes written under a different type is
//! undefined (it surfaces as a decode error or a silently wrong value).

use crate::error::CacheResult;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Converts typed values to and from opaque byte sequences.
///
/// Implementations must be deterministic for the same value/type pair
/// within a process. Cross-version stability of the encoding is not
/// promised; keys written by one build of an application should not be
/// assumed readable by another unless the implementation documents it.
pub trait BinarySerializer: Send + Sync {
    /// Encodes a value to bytes.
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> CacheResult<Vec<u8>>;

    /// Decodes bytes produced by [`encode`](Self::encode) under the same type.
    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> CacheResult<T>;
}

/// JSON-backed serializer, the default encoding for typed values.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer;

impl JsonSerializer {
    /// Creates a new JSON serializer.
    pub fn new() -> Self {
        Self
    }
}

impl BinarySerializer for JsonSerializer {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> CacheResult<Vec<u8>> {
        Ok(serde_json::to_vec(value)?)
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> CacheResult<T> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct User {
        id: u64,
        name: String,
        active: bool,
    }

    fn sample() -> User {
        User {
            id: 42,
            name: "nana".to_string(),
            active: true,
        }
    }

    #[test]
    fn test_round_trip() {
        let serializer = JsonSerializer::new();
        let bytes = serializer.encode(&sample()).unwrap();
        let decoded: User = serializer.decode(&bytes).unwrap();
        assert_eq!(decoded, sample());
    }

    #[test]
    fn test_encoding_is_deterministic_in_process() {
        let serializer = JsonSerializer::new();
        let a = serializer.encode(&sample()).unwrap();
        let b = serializer.encode(&sample()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_decode_with_wrong_type_fails() {
        let serializer = JsonSerializer::new();
        let bytes = serializer.encode(&sample()).unwrap();
        let result: CacheResult<Vec<String>> = serializer.decode(&bytes);
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_garbage_fails() {
        let serializer = JsonSerializer::new();
        let result: CacheResult<User> = serializer.decode(b"\x00\x01\x02");
        assert!(result.is_err());
    }

    #[test]
    fn test_scalar_round_trip() {
        let serializer = JsonSerializer::new();
        let bytes = serializer.encode(&12345i64).unwrap();
        let decoded: i64 = serializer.decode(&bytes).unwrap();
        assert_eq!(decoded, 12345);
    }
}
