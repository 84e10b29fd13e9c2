//! Generational bounded cache.
//!
//! Approximates LRU with two fixed-size generations instead of a recency
//! list. New and recently used entries live in the **fresh** generation; when
//! fresh fills up it is demoted wholesale to **stale**, and the previous stale
//! generation is dropped in one step. Touching an entry while it is stale
//! promotes it back into fresh, so only entries that went unused for a whole
//! generation are evicted.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────────┐
//! │                 GenerationalCache<K, V> Layout                           │
//! │                                                                          │
//! │   inner: Arc<RwLock<Generations<K, V>>>   (one lock, both maps)          │
//! │                                                                          │
//! │   fresh: FxHashMap<K, V>                stale: FxHashMap<K, V>           │
//! │   ┌──────────┬─────────┐               ┌──────────┬─────────┐            │
//! │   │  "k_90"  │  v90    │               │  "k_10"  │  v10    │            │
//! │   │  "k_91"  │  v91    │               │  "k_11"  │  v11    │            │
//! │   │   ...    │  ...    │               │   ...    │  ...    │            │
//! │   └──────────┴─────────┘               └──────────┴─────────┘            │
//! │     len ≤ half_capacity                  len ≤ half_capacity             │
//! │                                                                          │
//! │   capacity() = half_capacity * 2,  half_capacity = ceil(max_items / 2)   │
//! └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Algorithm
//!
//! ```text
//! INSERT_LOCKED(key, value):          // exclusive lock held
//!   if len(fresh) ≥ half_capacity and key ∉ fresh:
//!     retired ← stale                 // dropped after the lock is released
//!     stale   ← fresh
//!     fresh   ← {}
//!     evicted ← len(retired) > 0
//!   fresh[key] ← value
//!
//! GET(key):
//!   read lock:  key ∈ fresh  → hit, no mutation
//!   write lock: key ∈ stale  → remove from stale, INSERT_LOCKED (promotion)
//!               key ∈ fresh  → hit (a concurrent writer got there first)
//!               otherwise    → miss
//!
//! GET_OR_CREATE(key, create):
//!   as GET, but a miss calls create() once under the write lock
//!   and inserts the result via INSERT_LOCKED
//! ```
//!
//! An entry survives at least `half_capacity` and at most
//! `2 * half_capacity` insertions after its last access.
//!
//! ## Performance Characteristics
//!
//! | Operation       | Time   | Lock                                   |
//! |-----------------|--------|----------------------------------------|
//! | `get` (fresh)   | O(1)   | shared                                 |
//! | `get` (stale)   | O(1)*  | exclusive, may rotate                  |
//! | `peek`          | O(1)   | shared                                 |
//! | `add`           | O(1)*  | exclusive, may rotate                  |
//! | `get_or_create` | O(1)*  | shared fast path, exclusive on miss    |
//! | `purge`         | O(1)   | exclusive                              |
//!
//! \* Rotation swaps maps; the retired generation is freed after unlocking.
//!
//! ## Thread Safety
//!
//! A single `parking_lot::RwLock` guards both generations as one unit, since
//! a rotation must update both atomically. Fresh hits only take the read
//! lock. Every write-lock path re-checks both generations after acquiring
//! the lock, because state may have changed since the read-lock attempt.
//!
//! The creation function passed to [`GenerationalCache::get_or_create`] runs
//! while the write lock is held. It must not call back into the same cache
//! (that deadlocks), and a slow creator stalls every other writer.
//!
//! ## Example Usage
//!
//! ```
//! use gencache::policy::generational::{GenerationalCache, Generation};
//!
//! let cache = GenerationalCache::new(4); // two entries per generation
//!
//! cache.add("a", 1);
//! cache.add("b", 2);
//! // Fresh is full: "a" and "b" are demoted to stale.
//! cache.add("c", 3);
//! assert_eq!(cache.peek(&"a").unwrap().generation, Generation::Stale);
//!
//! // Reading "a" promotes it back to fresh.
//! let hit = cache.get(&"a").unwrap();
//! assert_eq!(hit.value, 1);
//! assert!(!cache.peek(&"a").unwrap().is_stale());
//!
//! // A value is created only when the key is missing.
//! let entry = cache.get_or_create("d", || 4);
//! assert!(entry.created);
//! ```

use std::borrow::Borrow;
use std::convert::Infallible;
use std::fmt;
use std::hash::Hash;
use std::mem;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::error::ConfigError;
#[cfg(feature = "metrics")]
use crate::metrics::{
    GenerationalMetrics, GenerationalMetricsRecorder, GenerationalMetricsSnapshot, MetricsReset,
    MetricsSnapshotProvider,
};
use crate::traits::{ConcurrentCache, GenerationalCacheTrait};

/// Capacity used by [`Default`].
pub const DEFAULT_CAPACITY: usize = 128;

/// The generation an entry currently lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Generation {
    /// Recently inserted or accessed; survives the next rotation.
    Fresh,
    /// Demoted by the last rotation; dropped by the next one unless accessed.
    Stale,
}

impl Generation {
    /// Returns `true` for [`Generation::Stale`].
    #[inline]
    pub fn is_stale(self) -> bool {
        self == Generation::Stale
    }
}

/// Result of a successful [`GenerationalCache::get`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched<V> {
    pub value: V,
    /// Promoting the entry out of stale forced a rotation that discarded a
    /// non-empty stale generation.
    pub evicted: bool,
}

/// Result of a successful [`GenerationalCache::peek`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Peeked<V> {
    pub value: V,
    pub generation: Generation,
}

impl<V> Peeked<V> {
    /// The entry is one rotation away from eviction.
    #[inline]
    pub fn is_stale(&self) -> bool {
        self.generation.is_stale()
    }
}

/// Result of [`GenerationalCache::get_or_create`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Populated<V> {
    pub value: V,
    /// This call ran the creation function and inserted its result.
    pub created: bool,
    /// The insertion discarded a non-empty stale generation.
    pub evicted: bool,
}

/// Stale generation dropped by a rotation, if one happened.
type Retired<K, V> = Option<FxHashMap<K, V>>;

struct Generations<K, V> {
    fresh: FxHashMap<K, V>,
    stale: FxHashMap<K, V>,
    half_capacity: usize,
}

impl<K, V> Generations<K, V>
where
    K: Eq + Hash,
{
    fn new(half_capacity: usize) -> Self {
        Self {
            fresh: FxHashMap::default(),
            stale: FxHashMap::default(),
            half_capacity,
        }
    }

    fn locate<Q>(&self, key: &Q) -> Option<(&V, Generation)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if let Some(value) = self.fresh.get(key) {
            return Some((value, Generation::Fresh));
        }
        self.stale.get(key).map(|value| (value, Generation::Stale))
    }

    /// The single mutation primitive. Callers hold the write lock and must
    /// have removed `key` from `stale` beforehand.
    fn insert_locked(&mut self, key: K, value: V) -> Retired<K, V> {
        let mut retired = None;
        if self.fresh.len() >= self.half_capacity && !self.fresh.contains_key(&key) {
            let demoted = mem::take(&mut self.fresh);
            retired = Some(mem::replace(&mut self.stale, demoted));
        }
        self.fresh.insert(key, value);
        retired
    }
}

/// Thread-safe bounded cache with two-generation approximate LRU eviction.
///
/// Cloning yields another handle to the same cache.
///
/// # Example
///
/// ```
/// use gencache::policy::generational::GenerationalCache;
///
/// let cache: GenerationalCache<String, u32> = GenerationalCache::new(100);
/// assert_eq!(cache.capacity(), 100);
///
/// assert!(!cache.add("key".to_string(), 7));
/// let hit = cache.get("key").unwrap();
/// assert_eq!(hit.value, 7);
/// assert!(!hit.evicted);
/// ```
pub struct GenerationalCache<K, V> {
    inner: Arc<RwLock<Generations<K, V>>>,
    half_capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: Arc<GenerationalMetrics>,
}

impl<K, V> GenerationalCache<K, V>
where
    K: Eq + Hash,
{
    /// Creates a cache holding up to `max_items` entries, rounded up to an
    /// even number.
    ///
    /// # Panics
    ///
    /// Panics if `max_items` is zero. For a non-panicking alternative, use
    /// [`try_new`](Self::try_new).
    pub fn new(max_items: usize) -> Self {
        match Self::try_new(max_items) {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Creates a cache holding up to `max_items` entries, returning an error
    /// instead of panicking on an invalid capacity.
    ///
    /// Each generation holds `ceil(max_items / 2)` entries, so an odd request
    /// is rounded up by one.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCapacity`] if `max_items` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use gencache::policy::generational::GenerationalCache;
    ///
    /// let cache = GenerationalCache::<u64, u64>::try_new(3).unwrap();
    /// assert_eq!(cache.capacity(), 4);
    ///
    /// assert!(GenerationalCache::<u64, u64>::try_new(0).is_err());
    /// ```
    pub fn try_new(max_items: usize) -> Result<Self, ConfigError> {
        if max_items < 1 {
            return Err(ConfigError::InvalidCapacity {
                requested: max_items,
            });
        }
        let half_capacity = max_items.div_ceil(2);
        Ok(Self {
            inner: Arc::new(RwLock::new(Generations::new(half_capacity))),
            half_capacity,
            #[cfg(feature = "metrics")]
            metrics: Arc::new(GenerationalMetrics::default()),
        })
    }

    /// Number of resident entries across both generations.
    pub fn len(&self) -> usize {
        let inner = self.inner.read();
        inner.fresh.len() + inner.stale.len()
    }

    /// Returns `true` if no entries are resident.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of entries in the fresh generation.
    pub fn fresh_len(&self) -> usize {
        self.inner.read().fresh.len()
    }

    /// Number of entries in the stale generation.
    pub fn stale_len(&self) -> usize {
        self.inner.read().stale.len()
    }

    /// Drops every entry. Capacity is unchanged.
    pub fn purge(&self) {
        let mut inner = self.inner.write();
        let fresh = mem::take(&mut inner.fresh);
        let stale = mem::take(&mut inner.stale);
        drop(inner);

        debug!(discarded = fresh.len() + stale.len(), "purged cache");
        #[cfg(feature = "metrics")]
        self.metrics.record_purge();
    }

    /// Inserts or overwrites `key` in the fresh generation.
    ///
    /// Returns `true` if the insertion rotated the generations and the
    /// discarded stale generation was non-empty. Overwriting a key that is
    /// already fresh never rotates.
    pub fn add(&self, key: K, value: V) -> bool {
        let mut inner = self.inner.write();
        let shadowed = inner.stale.remove(&key);
        let retired = inner.insert_locked(key, value);
        drop(inner);
        drop(shadowed);

        #[cfg(feature = "metrics")]
        self.metrics.record_add();
        self.settle(retired)
    }

    /// Returns `true` if either generation holds `key`. Never promotes.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.read().locate(key).is_some()
    }

    /// Looks up `key`, returning a clone of its value.
    ///
    /// A fresh hit only takes the read lock. A stale hit promotes the entry
    /// into fresh, which may rotate the generations; `evicted` reports
    /// whether that rotation discarded anything.
    pub fn get<Q>(&self, key: &Q) -> Option<Fetched<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.get_with(key, V::clone)
    }

    /// Looks up `key` and applies `f` to its value inside the lock.
    ///
    /// Same promotion behaviour as [`get`](Self::get), without requiring
    /// `V: Clone`.
    ///
    /// `f` runs while the cache lock is held (the write lock when the entry
    /// is promoted) and must not call back into this cache.
    ///
    /// # Example
    ///
    /// ```
    /// use gencache::policy::generational::GenerationalCache;
    ///
    /// let cache = GenerationalCache::new(10);
    /// cache.add("key", vec![1, 2, 3]);
    ///
    /// let len = cache.get_with(&"key", |v| v.len()).map(|hit| hit.value);
    /// assert_eq!(len, Some(3));
    /// ```
    pub fn get_with<Q, F, R>(&self, key: &Q, f: F) -> Option<Fetched<R>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        F: FnOnce(&V) -> R,
    {
        let inner = self.inner.read();
        if let Some(value) = inner.fresh.get(key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_fresh_hit();
            return Some(Fetched {
                value: f(value),
                evicted: false,
            });
        }
        drop(inner);

        let mut inner = self.inner.write();
        if let Some((owned, value)) = inner.stale.remove_entry(key) {
            // Insert before running `f` so a panicking closure cannot drop the entry.
            let retired = inner.insert_locked(owned, value);
            let output = inner.fresh.get(key).map(f);
            drop(inner);

            trace!("promoted stale entry");
            #[cfg(feature = "metrics")]
            self.metrics.record_promotion();
            let evicted = self.settle(retired);
            return output.map(|value| Fetched { value, evicted });
        }

        // Promoted or added by another writer between the two locks.
        if let Some(value) = inner.fresh.get(key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_fresh_hit();
            return Some(Fetched {
                value: f(value),
                evicted: false,
            });
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_miss();
        None
    }

    /// Looks up `key` without promoting it, returning a clone of its value
    /// and the generation holding it.
    ///
    /// Never mutates the cache. A [`Generation::Stale`] result means the
    /// entry will be dropped by the next rotation unless it is accessed.
    pub fn peek<Q>(&self, key: &Q) -> Option<Peeked<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.peek_with(key, V::clone)
    }

    /// Looks up `key` without promoting it and applies `f` to its value.
    ///
    /// `f` runs under the read lock. It must not call back into this cache:
    /// a writer queued behind the read lock would deadlock with it.
    pub fn peek_with<Q, F, R>(&self, key: &Q, f: F) -> Option<Peeked<R>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        F: FnOnce(&V) -> R,
    {
        let inner = self.inner.read();
        inner.locate(key).map(|(value, generation)| Peeked {
            value: f(value),
            generation,
        })
    }

    /// Returns the value for `key`, creating it with `create` on a miss.
    ///
    /// Concurrent callers racing on the same missing key are serialized by
    /// the write lock: exactly one runs `create`, the rest observe its value
    /// with `created == false`. `create` runs while the write lock is held
    /// and must not call back into this cache.
    ///
    /// # Example
    ///
    /// ```
    /// use gencache::policy::generational::GenerationalCache;
    ///
    /// let cache = GenerationalCache::new(10);
    ///
    /// let first = cache.get_or_create("key", || 42);
    /// assert!(first.created);
    ///
    /// let second = cache.get_or_create("key", || unreachable!());
    /// assert_eq!(second.value, 42);
    /// assert!(!second.created);
    /// ```
    pub fn get_or_create<F>(&self, key: K, create: F) -> Populated<V>
    where
        F: FnOnce() -> V,
        V: Clone,
    {
        match self.try_get_or_create(key, || Ok::<V, Infallible>(create())) {
            Ok(populated) => populated,
            Err(never) => match never {},
        }
    }

    /// Fallible form of [`get_or_create`](Self::get_or_create).
    ///
    /// If `create` fails, nothing is inserted and its error is returned.
    ///
    /// # Errors
    ///
    /// Returns whatever error `create` returns.
    ///
    /// # Example
    ///
    /// ```
    /// use gencache::policy::generational::GenerationalCache;
    ///
    /// let cache: GenerationalCache<&str, u32> = GenerationalCache::new(10);
    ///
    /// let failed = cache.try_get_or_create("port", || "not a number".parse::<u32>());
    /// assert!(failed.is_err());
    /// assert!(!cache.contains("port"));
    ///
    /// let parsed = cache.try_get_or_create("port", || "8080".parse::<u32>()).unwrap();
    /// assert_eq!(parsed.value, 8080);
    /// ```
    pub fn try_get_or_create<F, E>(&self, key: K, create: F) -> Result<Populated<V>, E>
    where
        F: FnOnce() -> Result<V, E>,
        V: Clone,
    {
        {
            let inner = self.inner.read();
            if let Some(value) = inner.fresh.get(&key) {
                #[cfg(feature = "metrics")]
                self.metrics.record_fresh_hit();
                return Ok(Populated {
                    value: value.clone(),
                    created: false,
                    evicted: false,
                });
            }
        }

        let mut inner = self.inner.write();
        if let Some(value) = inner.stale.remove(&key) {
            let output = value.clone();
            let retired = inner.insert_locked(key, value);
            drop(inner);

            trace!("promoted stale entry");
            #[cfg(feature = "metrics")]
            self.metrics.record_promotion();
            return Ok(Populated {
                value: output,
                created: false,
                evicted: self.settle(retired),
            });
        }

        // Another caller created it between the two locks.
        if let Some(value) = inner.fresh.get(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_fresh_hit();
            return Ok(Populated {
                value: value.clone(),
                created: false,
                evicted: false,
            });
        }

        let value = match create() {
            Ok(value) => value,
            Err(err) => {
                drop(inner);
                #[cfg(feature = "metrics")]
                self.metrics.record_create_failure();
                return Err(err);
            },
        };
        let output = value.clone();
        let retired = inner.insert_locked(key, value);
        drop(inner);

        trace!("created entry");
        #[cfg(feature = "metrics")]
        self.metrics.record_create();
        Ok(Populated {
            value: output,
            created: true,
            evicted: self.settle(retired),
        })
    }

    /// Records a rotation and frees the retired generation. Call only after
    /// the write lock has been released.
    fn settle(&self, retired: Retired<K, V>) -> bool {
        let Some(stale) = retired else {
            return false;
        };
        let discarded = stale.len();
        debug!(
            discarded,
            half_capacity = self.half_capacity,
            "rotated generations"
        );
        #[cfg(feature = "metrics")]
        self.metrics.record_rotation(discarded);
        discarded > 0
    }

    /// Returns the counters plus current generation sizes.
    #[cfg(feature = "metrics")]
    pub fn metrics(&self) -> GenerationalMetricsSnapshot {
        let (fresh_len, stale_len) = {
            let inner = self.inner.read();
            (inner.fresh.len(), inner.stale.len())
        };
        GenerationalMetricsSnapshot {
            fresh_len,
            stale_len,
            capacity: self.capacity(),
            ..self.metrics.counters()
        }
    }

    /// Resets every counter to zero. Shared with all clones of this cache.
    #[cfg(feature = "metrics")]
    pub fn reset_metrics(&self) {
        self.metrics.reset_metrics();
    }

    /// Validates internal invariants (debug-only).
    #[cfg(debug_assertions)]
    pub fn check_invariants(&self) -> Result<(), crate::error::InvariantError>
    where
        K: fmt::Debug,
    {
        use crate::error::InvariantError;

        let inner = self.inner.read();
        if inner.half_capacity != self.half_capacity {
            return Err(InvariantError::new(format!(
                "half capacity {} != handle half capacity {}",
                inner.half_capacity, self.half_capacity
            )));
        }
        if inner.fresh.len() > inner.half_capacity {
            return Err(InvariantError::new(format!(
                "fresh holds {} entries, limit {}",
                inner.fresh.len(),
                inner.half_capacity
            )));
        }
        if inner.stale.len() > inner.half_capacity {
            return Err(InvariantError::new(format!(
                "stale holds {} entries, limit {}",
                inner.stale.len(),
                inner.half_capacity
            )));
        }
        if let Some(key) = inner.fresh.keys().find(|k| inner.stale.contains_key(*k)) {
            return Err(InvariantError::new(format!(
                "key {:?} present in both generations",
                key
            )));
        }
        Ok(())
    }
}

impl<K, V> GenerationalCache<K, V> {
    /// Maximum number of resident entries (`2 * ceil(max_items / 2)`).
    #[inline]
    pub fn capacity(&self) -> usize {
        self.half_capacity * 2
    }
}

impl<K, V> Clone for GenerationalCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            half_capacity: self.half_capacity,
            #[cfg(feature = "metrics")]
            metrics: Arc::clone(&self.metrics),
        }
    }
}

impl<K, V> Default for GenerationalCache<K, V>
where
    K: Eq + Hash,
{
    /// Creates a cache with a capacity of 128.
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<K, V> fmt::Debug for GenerationalCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("GenerationalCache")
            .field("fresh_len", &inner.fresh.len())
            .field("stale_len", &inner.stale.len())
            .field("capacity", &self.capacity())
            .finish_non_exhaustive()
    }
}

impl<K, V> GenerationalCacheTrait<K, V> for GenerationalCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    fn add(&self, key: K, value: V) -> bool {
        GenerationalCache::add(self, key, value)
    }

    fn get(&self, key: &K) -> Option<Fetched<V>> {
        GenerationalCache::get(self, key)
    }

    fn peek(&self, key: &K) -> Option<Peeked<V>> {
        GenerationalCache::peek(self, key)
    }

    fn get_or_create<F>(&self, key: K, create: F) -> Populated<V>
    where
        F: FnOnce() -> V,
    {
        GenerationalCache::get_or_create(self, key, create)
    }

    fn contains(&self, key: &K) -> bool {
        GenerationalCache::contains(self, key)
    }

    fn len(&self) -> usize {
        GenerationalCache::len(self)
    }

    fn capacity(&self) -> usize {
        GenerationalCache::capacity(self)
    }

    fn purge(&self) {
        GenerationalCache::purge(self)
    }
}

impl<K, V> ConcurrentCache for GenerationalCache<K, V>
where
    K: Send + Sync,
    V: Send + Sync,
{
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<GenerationalMetricsSnapshot> for GenerationalCache<K, V>
where
    K: Eq + Hash,
{
    fn snapshot(&self) -> GenerationalMetricsSnapshot {
        self.metrics()
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsReset for GenerationalCache<K, V>
where
    K: Eq + Hash,
{
    fn reset_metrics(&self) {
        GenerationalCache::reset_metrics(self);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
