//! # Cache Traits
//!
//! The operation set of a generational cache, expressed as a trait so callers
//! can stay generic over the concrete cache type, plus the thread-safety
//! marker shared with the rest of the crate.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────┐
//!   │               GenerationalCacheTrait<K, V>                       │
//!   │                                                                  │
//!   │  add(&, K, V) → bool                       (evicted)             │
//!   │  get(&, &K) → Option<Fetched<V>>           (may promote)         │
//!   │  peek(&, &K) → Option<Peeked<V>>           (never mutates)       │
//!   │  get_or_create(&, K, FnOnce) → Populated<V>                      │
//!   │  contains(&, &K) → bool                                          │
//!   │  len(&) / is_empty(&) / capacity(&)                              │
//!   │  purge(&)                                                        │
//!   └──────────────────────────────────────────────────────────────────┘
//!                                   +
//!   ┌──────────────────────────────────────────────────────────────────┐
//!   │ ConcurrentCache: Send + Sync marker                              │
//!   └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All methods take `&self`: implementations synchronize internally, so one
//! cache can be shared across threads behind an `Arc` or by cloning a handle.
//!
//! ## Example Usage
//!
//! ```
//! use gencache::policy::generational::GenerationalCache;
//! use gencache::traits::{ConcurrentCache, GenerationalCacheTrait};
//!
//! fn warm<C: GenerationalCacheTrait<u64, String> + ConcurrentCache>(cache: &C) {
//!     for i in 0..4 {
//!         cache.add(i, format!("value-{}", i));
//!     }
//! }
//!
//! let cache = GenerationalCache::new(8);
//! warm(&cache);
//! assert_eq!(cache.len(), 4);
//! ```

use crate::policy::generational::{Fetched, Peeked, Populated};

/// Operations of a bounded cache that ages entries in two generations.
///
/// See [`GenerationalCache`](crate::policy::generational::GenerationalCache)
/// for the rotation and promotion protocol.
pub trait GenerationalCacheTrait<K, V> {
    /// Inserts or overwrites `key`, returning `true` when the insertion
    /// discarded a non-empty stale generation.
    fn add(&self, key: K, value: V) -> bool;

    /// Looks up `key`, promoting it out of the stale generation if needed.
    fn get(&self, key: &K) -> Option<Fetched<V>>;

    /// Looks up `key` without promoting it, reporting which generation holds it.
    fn peek(&self, key: &K) -> Option<Peeked<V>>;

    /// Returns the cached value for `key`, calling `create` at most once to
    /// populate it on a miss.
    fn get_or_create<F>(&self, key: K, create: F) -> Populated<V>
    where
        F: FnOnce() -> V;

    /// Returns `true` if either generation holds `key`.
    fn contains(&self, key: &K) -> bool;

    /// Number of resident entries across both generations.
    fn len(&self) -> usize;

    /// Returns `true` if no entries are resident.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of resident entries.
    fn capacity(&self) -> usize;

    /// Drops every entry; capacity is unchanged.
    fn purge(&self);
}

/// Marker trait for caches that are safe to share across threads.
///
/// Usage: `fn use_cache<C: GenerationalCacheTrait<K, V> + ConcurrentCache>(c: &C)`
pub trait ConcurrentCache: Send + Sync {}
