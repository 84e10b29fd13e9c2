//! Optional cache metrics (enabled with the `metrics` feature).
//!
//! Recording, snapshotting and exporting are kept apart:
//!
//! - [`GenerationalMetrics`](metrics_impl::GenerationalMetrics) holds the live
//!   counters and implements [`GenerationalMetricsRecorder`](traits::GenerationalMetricsRecorder).
//! - [`GenerationalMetricsSnapshot`](snapshot::GenerationalMetricsSnapshot) is a
//!   plain copy of the counters plus gauges captured at snapshot time.
//! - [`PrometheusTextExporter`](exporter::PrometheusTextExporter) publishes a
//!   snapshot in the Prometheus text exposition format.

pub mod cell;
pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use exporter::PrometheusTextExporter;
pub use metrics_impl::GenerationalMetrics;
pub use snapshot::GenerationalMetricsSnapshot;
pub use traits::{
    GenerationalMetricsRecorder, MetricsExporter, MetricsReset, MetricsSnapshotProvider,
};
