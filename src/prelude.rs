#[cfg(feature = "concurrency")]
pub use crate::cache::ConcurrentCacheHash;
pub use crate::cache::{CacheHash, EvictCallback};
pub use crate::ds::{EntryArena, Handle, RecencyList};
pub use crate::error::InvariantError;
pub use crate::traits::{CoreCache, LruCacheTrait, MutableCache};
