use std::fmt;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GenerationalMetricsSnapshot {
    pub fresh_hits: u64,
    pub promotions: u64, // stale hits, each one moved the entry back to fresh
    pub misses: u64,

    pub adds: u64,
    pub creates: u64,
    pub create_failures: u64,

    pub rotations: u64,
    pub evictions: u64, // rotations that dropped a non-empty stale generation
    pub evicted_entries: u64,
    pub purges: u64,

    // gauges captured at snapshot time
    pub fresh_len: usize,
    pub stale_len: usize,
    pub capacity: usize,
}

impl GenerationalMetricsSnapshot {
    /// Lookups that found the key, in either generation.
    pub fn hits(&self) -> u64 {
        self.fresh_hits + self.promotions
    }

    /// Fraction of lookups that hit, `0.0` when nothing was looked up.
    ///
    /// Creations by `get_or_create` count as misses.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits() + self.misses + self.creates + self.create_failures;
        if total == 0 {
            0.0
        } else {
            self.hits() as f64 / total as f64
        }
    }
}

impl fmt::Display for GenerationalMetricsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GenerationalMetrics {{ fresh_hits: {}, promotions: {}, misses: {}, hit_rate: {:.2}%, \
             adds: {}, creates: {}, rotations: {}, evictions: {}, evicted_entries: {}, \
             fresh_len: {}, stale_len: {}, capacity: {} }}",
            self.fresh_hits,
            self.promotions,
            self.misses,
            self.hit_rate() * 100.0,
            self.adds,
            self.creates,
            self.rotations,
            self.evictions,
            self.evicted_entries,
            self.fresh_len,
            self.stale_len,
            self.capacity,
        )
    }
}
