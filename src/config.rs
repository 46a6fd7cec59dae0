//! Cache Configuration
//!
//! Configuration for [`BoundedLruCache`](crate::BoundedLruCache). The config
//! struct has public fields for simple instantiation; the capacity is a
//! `NonZeroUsize`, so a constructed config is always valid.
//!
//! Use [`LruCacheConfig::try_from`] when the capacity comes from an unchecked
//! `usize`, e.g. a value read from a consumer's settings.
//!
//! # Examples
//!
//! ```
//! use linked_cache::config::LruCacheConfig;
//! use linked_cache::BoundedLruCache;
//! use core::num::NonZeroUsize;
//!
//! let config = LruCacheConfig {
//!     capacity: NonZeroUsize::new(1000).unwrap(),
//! };
//! let cache: BoundedLruCache<String, i32> = BoundedLruCache::init(config, None);
//! assert_eq!(cache.cap().get(), 1000);
//!
//! // Zero is rejected when converting from a plain integer
//! assert!(LruCacheConfig::try_from(0usize).is_err());
//! ```

use crate::error::CacheError;
use core::fmt;
use core::num::NonZeroUsize;

/// Configuration for a bounded LRU cache.
///
/// # Fields
///
/// - `capacity`: Maximum number of live entries. Fixed for the lifetime of the
///   cache; the arena backing the recency list is sized from it up front.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LruCacheConfig {
    /// Maximum number of key-value pairs the cache can hold.
    pub capacity: NonZeroUsize,
}

impl LruCacheConfig {
    /// Creates a config with the given capacity.
    pub const fn new(capacity: NonZeroUsize) -> Self {
        Self { capacity }
    }
}

impl TryFrom<usize> for LruCacheConfig {
    type Error = CacheError;

    fn try_from(capacity: usize) -> Result<Self, Self::Error> {
        NonZeroUsize::new(capacity)
            .map(Self::new)
            .ok_or(CacheError::InvalidArgument { capacity })
    }
}

impl fmt::Debug for LruCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCacheConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}

/// Configuration for a [`SyncLruCache`](crate::SyncLruCache).
///
/// The synchronized wrapper guards one cache with a single global recency
/// order, so it takes the same settings as the single-threaded cache.
#[cfg(feature = "concurrent")]
pub type SyncLruCacheConfig = LruCacheConfig;
