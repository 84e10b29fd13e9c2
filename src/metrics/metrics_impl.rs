use crate::metrics::cell::MetricsCell;
use crate::metrics::snapshot::GenerationalMetricsSnapshot;
use crate::metrics::traits::{GenerationalMetricsRecorder, MetricsReset};

/// Live counters for a generational cache.
///
/// Shared between clones of the same cache. Gauges (generation sizes,
/// capacity) are not stored here; the cache fills them in when it takes a
/// snapshot.
#[derive(Debug, Default)]
pub struct GenerationalMetrics {
    pub fresh_hits: MetricsCell,
    pub promotions: MetricsCell,
    pub misses: MetricsCell,
    pub adds: MetricsCell,
    pub creates: MetricsCell,
    pub create_failures: MetricsCell,
    pub rotations: MetricsCell,
    pub evictions: MetricsCell,
    pub evicted_entries: MetricsCell,
    pub purges: MetricsCell,
}

impl GenerationalMetrics {
    /// Copies the counters into a snapshot with zeroed gauges.
    pub fn counters(&self) -> GenerationalMetricsSnapshot {
        GenerationalMetricsSnapshot {
            fresh_hits: self.fresh_hits.get(),
            promotions: self.promotions.get(),
            misses: self.misses.get(),
            adds: self.adds.get(),
            creates: self.creates.get(),
            create_failures: self.create_failures.get(),
            rotations: self.rotations.get(),
            evictions: self.evictions.get(),
            evicted_entries: self.evicted_entries.get(),
            purges: self.purges.get(),
            ..GenerationalMetricsSnapshot::default()
        }
    }
}

impl GenerationalMetricsRecorder for GenerationalMetrics {
    #[inline]
    fn record_fresh_hit(&self) {
        self.fresh_hits.incr();
    }

    #[inline]
    fn record_promotion(&self) {
        self.promotions.incr();
    }

    #[inline]
    fn record_miss(&self) {
        self.misses.incr();
    }

    #[inline]
    fn record_add(&self) {
        self.adds.incr();
    }

    #[inline]
    fn record_create(&self) {
        self.creates.incr();
    }

    #[inline]
    fn record_create_failure(&self) {
        self.create_failures.incr();
    }

    fn record_rotation(&self, discarded: usize) {
        self.rotations.incr();
        if discarded > 0 {
            self.evictions.incr();
            self.evicted_entries.add(discarded as u64);
        }
    }

    #[inline]
    fn record_purge(&self) {
        self.purges.incr();
    }
}

impl MetricsReset for GenerationalMetrics {
    fn reset_metrics(&self) {
        self.fresh_hits.reset();
        self.promotions.reset();
        self.misses.reset();
        self.adds.reset();
        self.creates.reset();
        self.create_failures.reset();
        self.rotations.reset();
        self.evictions.reset();
        self.evicted_entries.reset();
        self.purges.reset();
    }
}
