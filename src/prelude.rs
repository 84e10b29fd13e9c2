pub use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::{
    GenerationalMetricsSnapshot, MetricsExporter, MetricsReset, MetricsSnapshotProvider,
    PrometheusTextExporter,
};
pub use crate::policy::generational::{
    Fetched, Generation, GenerationalCache, Peeked, Populated,
};
pub use crate::traits::{ConcurrentCache, GenerationalCacheTrait};
