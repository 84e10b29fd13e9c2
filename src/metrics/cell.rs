use std::sync::atomic::{AtomicU64, Ordering};

/// A metrics-only counter.
///
/// Counters are bumped from both the shared-lock read path and the
/// exclusive-lock write path, so the cell is atomic. Metrics are
/// observational and never feed back into cache decisions, so relaxed
/// ordering is enough.
#[repr(transparent)]
#[derive(Debug, Default)]
pub struct MetricsCell(AtomicU64);

impl MetricsCell {
    #[inline]
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn incr(&self) {
        self.add(1);
    }

    #[inline]
    pub fn add(&self, n: u64) {
        self.0.fetch_add(n, Ordering::Relaxed);
    }

    #[inline]
    pub fn reset(&self) {
        self.0.store(0, Ordering::Relaxed);
    }
}
