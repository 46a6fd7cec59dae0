#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## Choosing an Entry Point
//!
//! | Type | Use when |
//! |------|----------|
//! | [`BoundedLruCache`] | One owner, or you already hold a lock |
//! | `SyncLruCache` | Shared across threads (`concurrent` feature) |
//!
//! ## Construction
//!
//! ```rust
//! use linked_cache::BoundedLruCache;
//! use linked_cache::config::LruCacheConfig;
//! use core::num::NonZeroUsize;
//!
//! // Fallible, from a plain integer
//! let a: BoundedLruCache<String, u64> = BoundedLruCache::new(128).unwrap();
//!
//! // Infallible, from a validated config
//! let config = LruCacheConfig {
//!     capacity: NonZeroUsize::new(128).unwrap(),
//! };
//! let b: BoundedLruCache<String, u64> = BoundedLruCache::init(config, None);
//! assert_eq!(a.cap(), b.cap());
//! ```
//!
//! ## Metrics
//!
//! ```rust
//! use linked_cache::BoundedLruCache;
//! use linked_cache::metrics::CacheMetrics;
//!
//! let mut cache = BoundedLruCache::new(1).unwrap();
//! cache.set("x", 1);
//! cache.set("y", 2);
//! assert!(cache.try_get(&"x").is_none());
//!
//! let metrics = cache.metrics();
//! assert_eq!(metrics["evictions"], 1.0);
//! assert_eq!(metrics["cache_misses"], 1.0);
//! ```
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade: construction at `debug` level and
//! each eviction at `trace` level. Nothing is emitted unless the application
//! installs a logger.
//!
//! ## Modules
//!
//! - [`lru`]: The bounded LRU cache
//! - [`config`]: Configuration structures
//! - [`error`]: The error type
//! - [`metrics`]: Metrics collection for cache activity
//! - `concurrent`: Synchronized wrapper (requires `concurrent` feature)

#![no_std]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(any(test, feature = "std", not(feature = "hashbrown")))]
extern crate std;

/// Arena-backed doubly linked list keeping recency order.
///
/// Internal infrastructure; the cache owns the only instance.
pub(crate) mod list;

/// Cache configuration structures.
pub mod config;

/// Error type for cache construction and lookup.
pub mod error;

/// Least Recently Used (LRU) cache implementation.
///
/// Provides a fixed-size cache that evicts the least recently used entry when
/// a new key arrives at capacity.
pub mod lru;

/// Cache metrics system.
pub mod metrics;

/// Synchronized wrapper around the LRU cache.
///
/// Available when the `concurrent` feature is enabled.
#[cfg(feature = "concurrent")]
pub mod concurrent;

pub use error::CacheError;
pub use lru::BoundedLruCache;

#[cfg(feature = "concurrent")]
pub use concurrent::SyncLruCache;
