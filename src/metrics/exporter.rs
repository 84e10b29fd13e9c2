use std::io::Write;

use parking_lot::Mutex;

use crate::metrics::snapshot::GenerationalMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for cache metrics snapshots.
///
/// This exporter writes in the Prometheus text exposition format so it can be
/// scraped by Prometheus or forwarded to an OpenTelemetry collector.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the exporter and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn write_metric(&self, kind: &str, suffix: &str, value: u64) {
        let name = self.metric_name(suffix);
        let mut writer = self.writer.lock();
        // A scrape sink that fails mid-write loses that sample only.
        let _ = writeln!(writer, "# TYPE {} {}", name, kind);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send> MetricsExporter<GenerationalMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &GenerationalMetricsSnapshot) {
        let counters = [
            ("fresh_hits_total", snapshot.fresh_hits),
            ("promotions_total", snapshot.promotions),
            ("misses_total", snapshot.misses),
            ("adds_total", snapshot.adds),
            ("creates_total", snapshot.creates),
            ("create_failures_total", snapshot.create_failures),
            ("rotations_total", snapshot.rotations),
            ("evictions_total", snapshot.evictions),
            ("evicted_entries_total", snapshot.evicted_entries),
            ("purges_total", snapshot.purges),
        ];
        for (suffix, value) in counters {
            self.write_metric("counter", suffix, value);
        }

        self.write_metric("gauge", "fresh_len", snapshot.fresh_len as u64);
        self.write_metric("gauge", "stale_len", snapshot.stale_len as u64);
        self.write_metric("gauge", "capacity", snapshot.capacity as u64);
    }
}
