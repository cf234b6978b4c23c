//! Tracing bootstrap and statsd metrics sink, shared by every binary in the
//! workspace so logging and metrics configuration has exactly one source.

mod metrics;
mod tracing_init;

pub use metrics::MetricsSink;
pub use tracing_init::init_tracing;
