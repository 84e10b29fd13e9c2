//! # Metrics Traits
//!
//! Recording, snapshotting and export are separate responsibilities:
//!
//! ```text
//!   GenerationalCache ──record_*──► GenerationalMetricsRecorder
//!                                          │
//!                     ┌────────────────────┴────────────────────┐
//!                     ▼                                         ▼
//!   MetricsSnapshotProvider<S> (bench/test)       MetricsExporter<S> (monitoring)
//! ```
//!
//! Recorders take `&self`: the cache records hits on the shared-lock path,
//! where no mutable access is available.

/// Counters recorded by [`GenerationalCache`](crate::policy::generational::GenerationalCache).
pub trait GenerationalMetricsRecorder {
    /// A lookup found the key in the fresh generation.
    fn record_fresh_hit(&self);
    /// A lookup found the key in the stale generation and promoted it.
    fn record_promotion(&self);
    /// A `get` found the key in neither generation.
    fn record_miss(&self);
    /// An `add` call.
    fn record_add(&self);
    /// `get_or_create` ran the caller's creation function.
    fn record_create(&self);
    /// The creation function returned an error; nothing was inserted.
    fn record_create_failure(&self);
    /// Fresh was full and was demoted; `discarded` stale entries were dropped.
    fn record_rotation(&self, discarded: usize);
    /// Both generations were cleared.
    fn record_purge(&self);
}

/// Snapshot provider for bench/testing.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Reset metrics between tests or benchmark iterations.
pub trait MetricsReset {
    fn reset_metrics(&self);
}

/// Export/publish metrics to production monitoring backends.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
