//! Stashkit core types.
//!
//! Leaf crate shared by the cache facade: the unified error taxonomy
//! ([`CacheError`] / [`CacheResult`]) and the pluggable binary serialization
//! boundary ([`BinarySerializer`] with the [`JsonSerializer`] default).

pub mod error;
pub mod serialize;

pub use error::{CacheError, CacheResult};
pub use serialize::{BinarySerializer, JsonSerializer};
