//! Least Recently Used (LRU) Cache Implementation
//!
//! A bounded cache with O(1) `get`, `set` and eviction. When the cache is full,
//! inserting a new key evicts the least recently used entry.
//!
//! # Structure
//!
//! ```text
//!   map: K ──▶ slot                      list (arena of slots)
//!   ┌──────────────┐        head                              tail
//!   │ "b" ──▶ 2    │         │                                 │
//!   │ "a" ──▶ 0    │         ▼                                 ▼
//!   │ "c" ──▶ 1    │      [slot 1: c] ◀──▶ [slot 0: a] ◀──▶ [slot 2: b]
//!   └──────────────┘        (MRU)                            (LRU)
//! ```
//!
//! The map answers membership and lookup; the list keeps recency order, so
//! promotion and eviction never scan. List nodes refer to each other by arena
//! slot, and the slot of an evicted entry is recycled for the next insertion.
//!
//! # Performance Characteristics
//!
//! - **Time Complexity**: `contains`, `get`, `set` and eviction are O(1) average
//! - **Space Complexity**: O(capacity); the arena is allocated up front and
//!   never grows past `capacity` slots
//!
//! # Error Semantics
//!
//! [`BoundedLruCache::get`] on a missing key is an error
//! ([`CacheError::KeyNotFound`]). Use [`BoundedLruCache::try_get`] when a miss is
//! an expected outcome, or check [`BoundedLruCache::contains`] first.
//!
//! # Thread Safety
//!
//! This implementation is not thread-safe. `get` mutates the recency order, so
//! concurrent use needs exclusive access for reads too. Wrap the cache in a
//! `Mutex`, or enable the `concurrent` feature and use
//! [`SyncLruCache`](crate::SyncLruCache).

use crate::config::LruCacheConfig;
use crate::error::CacheError;
use crate::list::{self, List};
use crate::metrics::{CacheMetrics, LruCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::iter::FusedIterator;
use core::num::NonZeroUsize;
use log::{debug, trace};

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// A fixed-capacity cache that evicts the least recently used entry.
///
/// Every `get` or `set` of a key makes it the most recently used entry. When a
/// new key is set on a full cache, the least recently used entry is evicted
/// first, so the cache never holds more than `cap()` entries.
///
/// Values are cloned out of [`get`](Self::get); callers never hold a reference
/// into an entry that a later `set` could evict.
///
/// # Examples
///
/// ```
/// use linked_cache::{BoundedLruCache, CacheError};
///
/// let mut cache = BoundedLruCache::new(2)?;
///
/// cache.set("apple", 1);
/// cache.set("banana", 2);
///
/// // Accessing an entry makes it the most recently used
/// assert_eq!(cache.get(&"apple")?, 1);
///
/// // Adding beyond capacity evicts the least recently used entry
/// cache.set("cherry", 3);
/// assert!(!cache.contains(&"banana"));
/// assert_eq!(cache.get(&"banana"), Err(CacheError::KeyNotFound));
/// assert_eq!(cache.get(&"apple")?, 1);
/// assert_eq!(cache.get(&"cherry")?, 3);
/// # Ok::<(), CacheError>(())
/// ```
pub struct BoundedLruCache<K, V, S = DefaultHashBuilder> {
    config: LruCacheConfig,
    list: List<(K, V)>,
    map: HashMap<K, usize, S>,
    metrics: LruCacheMetrics,
}

impl<K: Hash + Eq, V> BoundedLruCache<K, V, DefaultHashBuilder> {
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// Returns [`CacheError::InvalidArgument`] if `capacity` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_cache::{BoundedLruCache, CacheError};
    ///
    /// let cache: BoundedLruCache<u32, String> = BoundedLruCache::new(16)?;
    /// assert_eq!(cache.cap().get(), 16);
    ///
    /// let rejected = BoundedLruCache::<u32, String>::new(0);
    /// assert_eq!(rejected.err(), Some(CacheError::InvalidArgument { capacity: 0 }));
    /// # Ok::<(), CacheError>(())
    /// ```
    pub fn new(capacity: usize) -> Result<Self, CacheError> {
        let config = LruCacheConfig::try_from(capacity)?;
        Ok(Self::init(config, None))
    }

    /// Creates a cache from a configuration, with an optional hash builder.
    ///
    /// If `hasher` is `None`, the default hash builder is used.
    pub fn init(config: LruCacheConfig, hasher: Option<DefaultHashBuilder>) -> Self {
        Self::with_hasher(config.capacity, hasher.unwrap_or_default())
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> BoundedLruCache<K, V, S> {
    /// Creates a cache with the given capacity and hash builder.
    pub fn with_hasher(cap: NonZeroUsize, hash_builder: S) -> Self {
        debug!("creating LRU cache with capacity {cap}");
        BoundedLruCache {
            config: LruCacheConfig::new(cap),
            list: List::new(cap),
            map: HashMap::with_capacity_and_hasher(cap.get(), hash_builder),
            metrics: LruCacheMetrics::new(cap.get() as u64),
        }
    }

    /// Creates a cache with the given capacity and hash builder.
    ///
    /// Returns [`CacheError::InvalidArgument`] if `capacity` is zero.
    pub fn try_with_hasher(capacity: usize, hash_builder: S) -> Result<Self, CacheError> {
        let config = LruCacheConfig::try_from(capacity)?;
        Ok(Self::with_hasher(config.capacity, hash_builder))
    }

    /// Maximum number of entries the cache holds.
    #[inline]
    pub fn cap(&self) -> NonZeroUsize {
        self.config.capacity
    }

    /// Number of live entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the cache holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns `true` if `key` is in the cache.
    ///
    /// Does not change the recency order.
    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.contains_key(key)
    }

    /// Returns a clone of the value for `key` and marks it most recently used.
    ///
    /// Returns [`CacheError::KeyNotFound`] if `key` is absent.
    pub fn get<Q>(&mut self, key: &Q) -> Result<V, CacheError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Clone,
    {
        self.try_get(key).ok_or(CacheError::KeyNotFound)
    }

    /// Like [`get`](Self::get), but returns `None` for a missing key.
    pub fn try_get<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Clone,
    {
        self.promote(key).cloned()
    }

    /// Marks `key` most recently used and lends its value, recording a hit or miss.
    pub(crate) fn promote<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let Some(&slot) = self.map.get(key) else {
            self.metrics.core.record_miss();
            return None;
        };
        self.list.move_to_front(slot);
        self.metrics.core.record_hit();
        Some(&self.list.get(slot).1)
    }

    /// Returns a reference to the value for `key` without changing the recency order.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let &slot = self.map.get(key)?;
        Some(&self.list.get(slot).1)
    }

    /// The most recently used entry.
    pub fn peek_mru(&self) -> Option<(&K, &V)> {
        let (k, v) = self.list.get(self.list.front()?);
        Some((k, v))
    }

    /// The least recently used entry, i.e. the next one to be evicted.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        let (k, v) = self.list.get(self.list.back()?);
        Some((k, v))
    }

    /// Iterates over the entries from most to least recently used.
    ///
    /// Does not change the recency order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.list.iter(),
        }
    }

    /// Asserts every structural invariant of the cache.
    ///
    /// Checks that map and list hold the same number of entries, that every
    /// list node is indexed by its own key at its own slot, and that the size
    /// never exceeds capacity. Intended for tests and debugging; it walks the
    /// whole cache.
    ///
    /// # Panics
    ///
    /// Panics with a description of the first violated invariant.
    pub fn debug_validate_invariants(&self)
    where
        K: fmt::Debug,
    {
        self.list.check_links();
        assert_eq!(
            self.map.len(),
            self.list.len(),
            "map.len({}) != list.len({})",
            self.map.len(),
            self.list.len()
        );
        assert!(
            self.map.len() <= self.cap().get(),
            "len({}) > capacity({})",
            self.map.len(),
            self.cap()
        );
        assert_eq!(self.list.cap(), self.cap(), "list capacity drifted");
        for (slot, (key, _)) in self.list.iter() {
            assert_eq!(
                self.map.get(key),
                Some(&slot),
                "key {key:?} at slot {slot} is not indexed at that slot"
            );
        }
        assert_eq!(
            self.metrics.core.entries,
            self.map.len() as u64,
            "entry gauge disagrees with len"
        );
    }

    /// Returns the metrics collected by this cache.
    pub fn lru_metrics(&self) -> &LruCacheMetrics {
        &self.metrics
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> BoundedLruCache<K, V, S> {
    /// Stores `value` under `key` and marks it most recently used.
    ///
    /// If `key` is present its value is replaced and the size is unchanged.
    /// Otherwise a new entry is created; if the cache is full, the least
    /// recently used entry is evicted first.
    pub fn set(&mut self, key: K, value: V) {
        if let Some(&slot) = self.map.get(&key) {
            self.list.get_mut(slot).1 = value;
            self.list.move_to_front(slot);
            self.metrics.core.record_update();
            return;
        }

        let (slot, evicted) = self.list.push_front((key.clone(), value));
        if let Some((old_key, _)) = evicted {
            self.map.remove(&old_key);
            self.metrics.core.record_eviction();
            trace!("evicted least recently used entry, reusing slot {slot}");
        }
        self.map.insert(key, slot);
        self.metrics.core.record_insertion();
    }
}

impl<K, V, S> fmt::Debug for BoundedLruCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedLruCache")
            .field("capacity", &self.config.capacity)
            .field("len", &self.list.len())
            .finish()
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> CacheMetrics for BoundedLruCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.metrics.metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        self.metrics.algorithm_name()
    }
}

impl<'a, K: Hash + Eq, V, S: BuildHasher> IntoIterator for &'a BoundedLruCache<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over a cache's entries from most to least recently used.
///
/// Created by [`BoundedLruCache::iter`].
pub struct Iter<'a, K, V> {
    inner: list::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, (k, v))| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, (k, v))| (k, v))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.inner.len())
            .finish()
    }
}
