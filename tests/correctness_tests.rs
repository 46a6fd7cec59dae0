//! Correctness Tests for the Bounded LRU Cache
//!
//! Validates eviction and promotion with small, predictable access patterns.
//! Each test states which key must be gone after the put that evicts it.
//!
//! ## Test Strategy
//! - Small cache sizes (1-5 entries) for predictable behavior
//! - Simple, deterministic access patterns
//! - Explicit checks for which key was evicted after each set

use linked_cache::config::LruCacheConfig;
use linked_cache::{BoundedLruCache, CacheError};
use std::cell::RefCell;
use std::num::NonZeroUsize;
use std::rc::Rc;
use std::sync::Arc;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Helper to create a BoundedLruCache with the given capacity
fn make_lru<K: std::hash::Hash + Eq + Clone, V>(cap: usize) -> BoundedLruCache<K, V> {
    let config = LruCacheConfig {
        capacity: NonZeroUsize::new(cap).unwrap(),
    };
    BoundedLruCache::init(config, None)
}

/// Keys from most to least recently used
fn recency<K: std::hash::Hash + Eq + Clone, V>(cache: &BoundedLruCache<K, V>) -> Vec<K> {
    cache.iter().map(|(k, _)| k.clone()).collect()
}

// ============================================================================
// CONSTRUCTION
// ============================================================================

#[test]
fn test_construct_rejects_zero_capacity() {
    let err = BoundedLruCache::<u32, u32>::new(0).unwrap_err();
    assert_eq!(err, CacheError::InvalidArgument { capacity: 0 });
    assert!(matches!(
        LruCacheConfig::try_from(0usize),
        Err(CacheError::InvalidArgument { .. })
    ));
}

#[test]
fn test_construct_starts_empty() {
    let cache: BoundedLruCache<u32, u32> = BoundedLruCache::new(5).unwrap();
    assert!(cache.is_empty());
    assert_eq!(cache.len(), 0);
    assert_eq!(cache.cap().get(), 5);
    assert_eq!(cache.iter().next(), None);
}

// ============================================================================
// EVICTION
// ============================================================================

#[test]
fn test_capacity_bound_after_every_set() {
    let mut cache = make_lru(4);
    for i in 0..50 {
        cache.set(i % 11, i);
        assert!(cache.len() <= 4);
    }
    assert_eq!(cache.len(), 4);
    cache.debug_validate_invariants();
}

#[test]
fn test_overflow_evicts_first_inserted() {
    let cap = 5;
    let mut cache = make_lru(cap);
    for k in 1..=cap + 1 {
        cache.set(k, k * 100);
    }
    assert!(!cache.contains(&1), "k1 should be evicted");
    for k in 2..=cap + 1 {
        assert!(cache.contains(&k), "k{k} should survive");
    }
    assert_eq!(cache.len(), cap);
}

#[test]
fn test_sequential_evictions_follow_insertion_order() {
    let mut cache = make_lru(3);
    cache.set("a", 1);
    cache.set("b", 2);
    cache.set("c", 3);

    cache.set("d", 4);
    assert!(!cache.contains(&"a"));
    cache.set("e", 5);
    assert!(!cache.contains(&"b"));
    cache.set("f", 6);
    assert!(!cache.contains(&"c"));

    assert_eq!(recency(&cache), ["f", "e", "d"]);
}

// ============================================================================
// PROMOTION
// ============================================================================

#[test]
fn test_get_promotes_past_newer_entry() {
    let mut cache = make_lru(2);
    cache.set("a", 1);
    cache.set("b", 2);
    assert_eq!(cache.get(&"a"), Ok(1));
    cache.set("c", 3);

    assert!(cache.contains(&"a"), "a was promoted and must survive");
    assert!(!cache.contains(&"b"), "b became least recently used");
    assert!(cache.contains(&"c"));
}

#[test]
fn test_promotion_scenario() {
    let mut cache = make_lru(3);
    cache.set(1, "a");
    cache.set(2, "b");
    cache.set(3, "c");
    assert_eq!(cache.get(&1), Ok("a"));
    cache.set(4, "d");

    assert!(cache.contains(&1));
    assert!(!cache.contains(&2), "key 2 should be evicted");
    assert!(cache.contains(&3));
    assert!(cache.contains(&4));
    assert_eq!(cache.get(&1), Ok("a"));
    cache.debug_validate_invariants();
}

#[test]
fn test_get_on_head_keeps_order() {
    let mut cache = make_lru(3);
    cache.set('x', 1);
    cache.set('y', 2);
    cache.set('z', 3);
    for _ in 0..3 {
        assert_eq!(cache.get(&'z'), Ok(3));
    }
    assert_eq!(recency(&cache), ['z', 'y', 'x']);
    cache.set('w', 4);
    assert!(!cache.contains(&'x'));
    cache.debug_validate_invariants();
}

#[test]
fn test_get_on_tail_moves_it_to_head() {
    let mut cache = make_lru(3);
    cache.set(1, ());
    cache.set(2, ());
    cache.set(3, ());
    cache.get(&1).unwrap();
    assert_eq!(recency(&cache), [1, 3, 2]);
    assert_eq!(cache.peek_lru().map(|(k, _)| *k), Some(2));
}

#[test]
fn test_get_middle_leaves_others_in_order() {
    let mut cache = make_lru(5);
    for k in 1..=5 {
        cache.set(k, k);
    }
    cache.get(&3).unwrap();
    assert_eq!(recency(&cache), [3, 5, 4, 2, 1]);
}

#[test]
fn test_contains_does_not_promote() {
    let mut cache = make_lru(2);
    cache.set("a", 1);
    cache.set("b", 2);
    assert!(cache.contains(&"a"));
    cache.set("c", 3);
    assert!(!cache.contains(&"a"));
}

// ============================================================================
// RE-SET
// ============================================================================

#[test]
fn test_reset_replaces_value_without_growing() {
    let mut cache = make_lru(3);
    cache.set("k", 1);
    cache.set("k", 2);
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get(&"k"), Ok(2));
}

#[test]
fn test_reset_promotes_entry() {
    let mut cache = make_lru(2);
    cache.set("a", 1);
    cache.set("b", 2);
    cache.set("a", 10);
    cache.set("c", 3);
    assert!(!cache.contains(&"b"));
    assert_eq!(cache.get(&"a"), Ok(10));
}

#[test]
fn test_reset_at_capacity_does_not_evict() {
    let mut cache = make_lru(2);
    cache.set(1, 'a');
    cache.set(2, 'b');
    cache.set(1, 'c');
    assert_eq!(cache.len(), 2);
    assert!(cache.contains(&1));
    assert!(cache.contains(&2));
}

// ============================================================================
// MISSING KEYS
// ============================================================================

#[test]
fn test_get_never_inserted_key() {
    let mut cache: BoundedLruCache<&str, i32> = make_lru(2);
    assert_eq!(cache.get(&"ghost"), Err(CacheError::KeyNotFound));
    assert_eq!(cache.try_get(&"ghost"), None);
}

#[test]
fn test_get_evicted_key() {
    let mut cache = make_lru(1);
    cache.set("old", 1);
    cache.set("new", 2);
    assert_eq!(cache.get(&"old"), Err(CacheError::KeyNotFound));
    assert_eq!(cache.get(&"new"), Ok(2));
}

#[test]
fn test_failed_get_leaves_cache_untouched() {
    let mut cache = make_lru(2);
    cache.set(1, 1);
    cache.set(2, 2);
    assert!(cache.get(&3).is_err());
    assert_eq!(recency(&cache), [2, 1]);
    assert_eq!(cache.len(), 2);
}

// ============================================================================
// VALUE TYPES
// ============================================================================

#[test]
fn test_owned_heap_values() {
    let mut cache = make_lru(2);
    cache.set("v", vec![1, 2, 3]);
    let mut copy = cache.get(&"v").unwrap();
    copy.push(4);
    assert_eq!(cache.get(&"v"), Ok(vec![1, 2, 3]));
}

#[test]
fn test_shared_values() {
    let mut cache = make_lru(2);
    let shared = Rc::new(RefCell::new(String::from("spline")));
    cache.set(1, Rc::clone(&shared));
    let out = cache.get(&1).unwrap();
    assert!(Rc::ptr_eq(&out, &shared));

    cache.set(2, Rc::new(RefCell::new(String::new())));
    cache.set(3, Rc::new(RefCell::new(String::new())));
    // Evicted, but the value outlives its entry
    assert!(!cache.contains(&1));
    assert_eq!(out.borrow().as_str(), "spline");
    assert_eq!(Rc::strong_count(&shared), 2);
}

#[test]
fn test_arc_values_are_dropped_on_eviction() {
    let mut cache = make_lru(1);
    let value = Arc::new(42);
    cache.set("a", Arc::clone(&value));
    assert_eq!(Arc::strong_count(&value), 2);
    cache.set("b", Arc::new(0));
    assert_eq!(Arc::strong_count(&value), 1);
}

#[test]
fn test_replaced_value_is_dropped() {
    let mut cache = make_lru(2);
    let first = Arc::new("first");
    cache.set(0, Arc::clone(&first));
    cache.set(0, Arc::new("second"));
    assert_eq!(Arc::strong_count(&first), 1);
    assert_eq!(*cache.get(&0).unwrap(), "second");
}

#[test]
fn test_tuple_keys() {
    // e.g. a spline-distance cache keyed by (curve id, sample index)
    let mut cache: BoundedLruCache<(u32, u16), f32> = make_lru(2);
    cache.set((7, 0), 0.0);
    cache.set((7, 1), 1.5);
    cache.get(&(7, 0)).unwrap();
    cache.set((8, 0), 0.0);
    assert!(!cache.contains(&(7, 1)));
    assert_eq!(cache.get(&(7, 0)), Ok(0.0));
}

// ============================================================================
// LONG RUNS
// ============================================================================

#[test]
fn test_slot_recycling_over_long_run() {
    let mut cache = make_lru(8);
    for i in 0..10_000u32 {
        cache.set(i, i.wrapping_mul(31));
        if i % 3 == 0 {
            let _ = cache.try_get(&(i / 2));
        }
    }
    assert_eq!(cache.len(), 8);
    cache.debug_validate_invariants();
    assert_eq!(cache.peek_mru().map(|(k, _)| *k), Some(9_999));
}
