//! Cache Metrics System
//!
//! Counters for cache activity reported through the [`CacheMetrics`] trait as a
//! `BTreeMap`, so metric names always come back in the same order.
//!
//! Only operations with cache semantics are counted: `get`/`try_get` record a
//! hit or a miss, `set` records an insertion or an update, and eviction records
//! itself. `contains`, `peek` and iteration are observation-only and leave the
//! counters alone.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

pub mod lru;

pub use lru::LruCacheMetrics;

/// Counters common to every cache.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CoreCacheMetrics {
    /// Total number of lookups (gets) made against the cache
    pub requests: u64,

    /// Number of lookups that found their key
    pub cache_hits: u64,

    /// Number of new keys stored
    pub insertions: u64,

    /// Number of `set` calls that replaced the value of an existing key
    pub updates: u64,

    /// Number of entries removed to make room for a new key
    pub evictions: u64,

    /// Number of live entries
    pub entries: u64,

    /// Maximum number of live entries
    pub capacity: u64,
}

impl CoreCacheMetrics {
    /// Creates a new CoreCacheMetrics instance for a cache of the given capacity
    pub fn new(capacity: u64) -> Self {
        Self {
            capacity,
            ..Default::default()
        }
    }

    /// Records a lookup that found its key
    pub fn record_hit(&mut self) {
        self.requests += 1;
        self.cache_hits += 1;
    }

    /// Records a lookup that did not find its key
    ///
    /// Misses are derived as `requests - cache_hits`.
    pub fn record_miss(&mut self) {
        self.requests += 1;
    }

    /// Records a new entry
    pub fn record_insertion(&mut self) {
        self.insertions += 1;
        self.entries += 1;
    }

    /// Records a value replaced in an existing entry
    pub fn record_update(&mut self) {
        self.updates += 1;
    }

    /// Records the removal of the least recently used entry
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
        self.entries -= 1;
    }

    /// Number of lookups that did not find their key
    pub fn cache_misses(&self) -> u64 {
        self.requests - self.cache_hits
    }

    /// Ratio of hits to lookups, between 0.0 and 1.0, or 0.0 before the first lookup
    pub fn hit_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_hits as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Ratio of misses to lookups, between 0.0 and 1.0, or 0.0 before the first lookup
    pub fn miss_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_misses() as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// How full the cache is, between 0.0 and 1.0
    pub fn cache_utilization(&self) -> f64 {
        if self.capacity > 0 {
            self.entries as f64 / self.capacity as f64
        } else {
            0.0
        }
    }

    /// Convert core metrics to a BTreeMap for reporting
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();

        // Counters
        metrics.insert("cache_hits".to_string(), self.cache_hits as f64);
        metrics.insert("cache_misses".to_string(), self.cache_misses() as f64);
        metrics.insert("evictions".to_string(), self.evictions as f64);
        metrics.insert("insertions".to_string(), self.insertions as f64);
        metrics.insert("requests".to_string(), self.requests as f64);
        metrics.insert("updates".to_string(), self.updates as f64);

        // Rates (0.0 to 1.0)
        metrics.insert("hit_rate".to_string(), self.hit_rate());
        metrics.insert("miss_rate".to_string(), self.miss_rate());

        // Occupancy
        metrics.insert("entries".to_string(), self.entries as f64);
        metrics.insert("capacity".to_string(), self.capacity as f64);
        metrics.insert("cache_utilization".to_string(), self.cache_utilization());

        if self.requests > 0 {
            metrics.insert(
                "eviction_rate".to_string(),
                self.evictions as f64 / self.requests as f64,
            );
        }

        metrics
    }
}

/// Uniform metrics reporting for cache implementations
///
/// Both [`BoundedLruCache`](crate::BoundedLruCache) and the synchronized wrapper
/// implement this, so reporting code does not care which one it holds.
pub trait CacheMetrics {
    /// Returns all metrics as key-value pairs, sorted by name
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// Algorithm name for identification, e.g. "LRU"
    fn algorithm_name(&self) -> &'static str;
}
