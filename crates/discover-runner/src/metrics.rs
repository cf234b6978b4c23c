use std::time::Duration;

/// Hook for the counters and timings a job run touches. Implemented by
/// `discover-telemetry`'s statsd sink in production; tests use [`NullMetrics`].
/// Kept as a trait rather than a direct dependency so this crate stays
/// testable without a metrics backend.
pub trait JobMetrics: Send + Sync {
    fn incr_download_capture(&self) {}
    fn incr_download_error(&self) {}
    fn incr_calculate_simhash(&self) {}
    fn incr_multiple_consecutive_errors(&self) {}
    fn time_task_wait(&self, _elapsed: Duration) {}
    fn time_task_duration(&self, _elapsed: Duration) {}
}

pub struct NullMetrics;

impl JobMetrics for NullMetrics {}
