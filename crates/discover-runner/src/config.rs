use discover_model::Width;
use std::time::Duration;

/// Tunables for a [`crate::JobRunner`], sourced from the service
/// configuration at startup.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Size of the bounded worker pool dispatched over one job's captures.
    pub threads: usize,
    /// Soft circuit-breaker: once tripped, remaining captures are skipped
    /// without network I/O for the rest of the job.
    pub max_download_errors: u32,
    /// TTL applied to a cache group on every successful write.
    pub expire_after: Duration,
    /// Per-capture byte cap enforced while streaming the response body.
    pub max_capture_bytes: usize,
    /// Passed through to the change-log query; `None` means unlimited.
    pub snapshots_per_year: Option<u32>,
    /// Fingerprint width used for every job.
    pub fingerprint_width: Width,
    /// Whether a cancelled job still commits the partial results it has
    /// collected so far. Left unspecified in the source system; this
    /// implementation makes it an explicit, configurable choice.
    pub commit_partial_on_cancel: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        RunnerConfig {
            threads: 4,
            max_download_errors: 10,
            expire_after: Duration::from_secs(60 * 60 * 24 * 30),
            max_capture_bytes: 1024 * 1024,
            snapshots_per_year: None,
            fingerprint_width: Width::W64,
            commit_partial_on_cancel: true,
        }
    }
}
