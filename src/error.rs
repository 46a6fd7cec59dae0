//! Error type shared by every fallible cache operation.

use thiserror::Error;

/// Errors reported by [`BoundedLruCache`](crate::BoundedLruCache).
///
/// Eviction is never an error; [`set`](crate::BoundedLruCache::set) is total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CacheError {
    /// The cache was constructed with a capacity of zero.
    #[error("invalid cache capacity {capacity}: a cache must hold at least one entry")]
    InvalidArgument {
        /// The rejected capacity.
        capacity: usize,
    },
    /// The requested key is not present in the cache.
    #[error("key not found in cache")]
    KeyNotFound,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CacheError::InvalidArgument { capacity: 0 }.to_string(),
            "invalid cache capacity 0: a cache must hold at least one entry"
        );
        assert_eq!(CacheError::KeyNotFound.to_string(), "key not found in cache");
    }
}
