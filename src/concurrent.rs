//! Synchronized LRU Cache
//!
//! [`BoundedLruCache`] has no internal locking: `get` mutates the recency list
//! and `set` may evict, so every operation needs exclusive access. This module
//! provides the explicit opt-in wrapper for sharing one cache across threads.
//!
//! # Architecture
//!
//! `SyncLruCache` guards a single `BoundedLruCache` with one
//! `parking_lot::Mutex`. There is no sharding: the recency order stays global,
//! so eviction picks exactly the entry a single-threaded cache would have
//! picked for the same sequence of operations.
//!
//! ## Why Mutex Instead of RwLock?
//!
//! A cache read is a write: `get` moves the entry to the front of the recency
//! list. Every access would take the write half of an `RwLock` anyway.
//!
//! ## Compound Operations
//!
//! Each method holds the lock for its whole duration. A `contains` followed by
//! a `get` on the other hand is two critical sections, and another thread may
//! evict the key in between. Use [`SyncLruCache::get_or_insert_with`] or
//! [`SyncLruCache::with_lock`] when a lookup and an update must be atomic.
//!
//! # Example
//!
//! ```rust
//! use linked_cache::SyncLruCache;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let cache = Arc::new(SyncLruCache::new(1000).unwrap());
//!
//! let handles: Vec<_> = (0..4).map(|t| {
//!     let cache = Arc::clone(&cache);
//!     thread::spawn(move || {
//!         for i in 0..100 {
//!             let key = format!("key_{}_{}", t, i);
//!             cache.set(key.clone(), i);
//!             let _ = cache.try_get(&key);
//!         }
//!     })
//! }).collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert_eq!(cache.len(), 400);
//! ```

use crate::config::SyncLruCacheConfig;
use crate::error::CacheError;
use crate::lru::BoundedLruCache;
use crate::metrics::CacheMetrics;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;
use parking_lot::Mutex;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;

/// A [`BoundedLruCache`] behind a mutex, shareable via `Arc`.
///
/// Values are cloned out of the cache so the lock is never held after a method
/// returns. Use [`get_with`](Self::get_with) to read a value in place.
pub struct SyncLruCache<K, V, S = DefaultHashBuilder> {
    inner: Mutex<BoundedLruCache<K, V, S>>,
}

impl<K: Hash + Eq, V> SyncLruCache<K, V, DefaultHashBuilder> {
    /// Creates a synchronized cache holding at most `capacity` entries.
    ///
    /// Returns [`CacheError::InvalidArgument`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, CacheError> {
        BoundedLruCache::new(capacity).map(Self::from)
    }

    /// Creates a synchronized cache from a configuration, with an optional hash builder.
    pub fn init(config: SyncLruCacheConfig, hasher: Option<DefaultHashBuilder>) -> Self {
        Self::from(BoundedLruCache::init(config, hasher))
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> SyncLruCache<K, V, S> {
    /// Creates a synchronized cache with a custom hash builder.
    pub fn with_hasher(cap: NonZeroUsize, hash_builder: S) -> Self {
        Self::from(BoundedLruCache::with_hasher(cap, hash_builder))
    }

    /// Maximum number of entries the cache holds.
    pub fn cap(&self) -> NonZeroUsize {
        self.inner.lock().cap()
    }

    /// Number of live entries.
    ///
    /// Other threads may change this as soon as the lock is released.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Returns `true` if `key` is in the cache. Does not change the recency order.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.lock().contains(key)
    }

    /// Returns a clone of the value for `key` and marks it most recently used.
    ///
    /// Returns [`CacheError::KeyNotFound`] if `key` is absent.
    pub fn get<Q>(&self, key: &Q) -> Result<V, CacheError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Clone,
    {
        self.inner.lock().get(key)
    }

    /// Like [`get`](Self::get), but returns `None` for a missing key.
    pub fn try_get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Clone,
    {
        self.inner.lock().try_get(key)
    }

    /// Marks `key` most recently used and applies `f` to its value under the lock.
    ///
    /// # Example
    ///
    /// ```rust
    /// use linked_cache::SyncLruCache;
    ///
    /// let cache = SyncLruCache::new(4).unwrap();
    /// cache.set("greeting", String::from("hello"));
    /// assert_eq!(cache.get_with(&"greeting", |v| v.len()), Some(5));
    /// ```
    pub fn get_with<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&V) -> R,
    {
        self.inner.lock().promote(key).map(f)
    }

    /// Runs `f` with exclusive access to the underlying cache.
    ///
    /// Everything `f` does happens in one critical section.
    pub fn with_lock<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut BoundedLruCache<K, V, S>) -> R,
    {
        f(&mut self.inner.lock())
    }

    /// Consumes the wrapper and returns the underlying cache.
    pub fn into_inner(self) -> BoundedLruCache<K, V, S> {
        self.inner.into_inner()
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> SyncLruCache<K, V, S> {
    /// Stores `value` under `key`, evicting the least recently used entry if full.
    pub fn set(&self, key: K, value: V) {
        self.inner.lock().set(key, value);
    }

    /// Returns the cached value for `key`, computing and storing it on a miss.
    ///
    /// The lookup, `f` and the insertion run under one lock acquisition, so
    /// concurrent callers never compute the same missing key twice. `f` must
    /// not access this cache.
    pub fn get_or_insert_with<F>(&self, key: K, f: F) -> V
    where
        V: Clone,
        F: FnOnce() -> V,
    {
        let mut cache = self.inner.lock();
        if let Some(value) = cache.try_get(&key) {
            return value;
        }
        let value = f();
        cache.set(key, value.clone());
        value
    }
}

impl<K, V, S> From<BoundedLruCache<K, V, S>> for SyncLruCache<K, V, S> {
    fn from(cache: BoundedLruCache<K, V, S>) -> Self {
        SyncLruCache {
            inner: Mutex::new(cache),
        }
    }
}

impl<K, V, S> fmt::Debug for SyncLruCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_lock() {
            Some(cache) => f.debug_struct("SyncLruCache").field("inner", &*cache).finish(),
            None => f
                .debug_struct("SyncLruCache")
                .field("inner", &format_args!("<locked>"))
                .finish(),
        }
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> CacheMetrics for SyncLruCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.inner.lock().metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        "LRU"
    }
}
