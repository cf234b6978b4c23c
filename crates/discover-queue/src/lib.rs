//! In-process task queue adapter standing in for the original system's
//! broker-backed task client. `submit`/`status`/`active` follow the same
//! contract a Celery-style result backend would, but the dispatch and the
//! state table both live in this process.

mod job_id;

pub use job_id::JobId;

use discover_model::JobState;
use discover_runner::{JobInput, JobMetrics, JobRunner, JobSink};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

/// Result of a submission: either a freshly started job, or the id of an
/// already-running job with the same `(url, year)` arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Started(JobId),
    AlreadyPending(JobId),
}

struct JobRecord {
    args: (String, String),
    state: JobState,
    cancel: CancellationToken,
}

struct RegistrySink {
    registry: Arc<Mutex<HashMap<JobId, JobRecord>>>,
    job_id: JobId,
}

impl JobSink for RegistrySink {
    fn update(&self, state: JobState) {
        if let Ok(mut registry) = self.registry.lock() {
            if let Some(record) = registry.get_mut(&self.job_id) {
                record.state = state;
            }
        }
    }
}

/// Owns the job registry and the runner it dispatches onto. One instance is
/// shared (via the API's router state) across every incoming request.
pub struct TaskQueue {
    runner: Arc<JobRunner>,
    metrics: Arc<dyn JobMetrics>,
    registry: Arc<Mutex<HashMap<JobId, JobRecord>>>,
}

impl TaskQueue {
    pub fn new(runner: JobRunner, metrics: Arc<dyn JobMetrics>) -> Self {
        TaskQueue {
            runner: Arc::new(runner),
            metrics,
            registry: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Starts a new job unless one with the same arguments is already
    /// active, in which case its id is returned instead (spec §4.7, §8 S6).
    #[instrument(skip(self))]
    pub fn submit(&self, url: String, year: String) -> SubmitOutcome {
        let args = (url.clone(), year.clone());

        if let Some(existing) = self.find_active(&args) {
            return SubmitOutcome::AlreadyPending(existing);
        }

        let job_id = JobId::new();
        let cancel = CancellationToken::new();
        {
            let mut registry = self.registry.lock().unwrap();
            registry.insert(
                job_id,
                JobRecord {
                    args,
                    state: JobState::Pending { info: "queued".to_string() },
                    cancel: cancel.clone(),
                },
            );
        }

        let runner = Arc::clone(&self.runner);
        let metrics = Arc::clone(&self.metrics);
        let registry = Arc::clone(&self.registry);
        let input = JobInput { url, year, submitted_at: Instant::now() };

        tokio::spawn(async move {
            let sink = RegistrySink { registry: Arc::clone(&registry), job_id };
            let outcome = runner.run(input, &sink, metrics.as_ref(), cancel).await;
            info!(job_id = %job_id, state = outcome.state.label(), "job settled");
            if let Ok(mut registry) = registry.lock() {
                if let Some(record) = registry.get_mut(&job_id) {
                    record.state = outcome.state;
                }
            }
        });

        SubmitOutcome::Started(job_id)
    }

    /// Looks up a job's current state. `None` means the id is unknown (never
    /// submitted, or evicted) rather than a distinct error — callers map
    /// that to their own "not found" response.
    pub fn status(&self, job_id: JobId) -> Option<JobState> {
        self.registry.lock().ok()?.get(&job_id).map(|record| record.state.clone())
    }

    /// Jobs currently `Pending`, with the arguments they were submitted
    /// with. A poisoned registry (the broker-unreachable analogue) is
    /// treated as "no active job" rather than propagated.
    pub fn active(&self) -> Vec<(JobId, (String, String))> {
        match self.registry.lock() {
            Ok(registry) => registry
                .iter()
                .filter(|(_, record)| !record.state.is_terminal())
                .map(|(id, record)| (*id, record.args.clone()))
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Looks up whether a job with these exact arguments is currently
    /// active, for callers (the `/simhash` and `/calculate-simhash`
    /// handlers) that need to report `PENDING` without submitting anything.
    pub fn active_job_for(&self, url: &str, year: &str) -> Option<JobId> {
        self.find_active(&(url.to_string(), year.to_string()))
    }

    /// Requests cancellation of a running job; has no effect on a job that
    /// has already reached a terminal state or an unknown id.
    pub fn cancel(&self, job_id: JobId) {
        if let Ok(registry) = self.registry.lock() {
            if let Some(record) = registry.get(&job_id) {
                record.cancel.cancel();
            }
        }
    }

    fn find_active(&self, args: &(String, String)) -> Option<JobId> {
        self.registry
            .lock()
            .ok()?
            .iter()
            .find(|(_, record)| &record.args == args && !record.state.is_terminal())
            .map(|(id, _)| *id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insert(registry: &mut HashMap<JobId, JobRecord>, args: (&str, &str), state: JobState) -> JobId {
        let id = JobId::new();
        registry.insert(
            id,
            JobRecord { args: (args.0.to_string(), args.1.to_string()), state, cancel: CancellationToken::new() },
        );
        id
    }

    fn find_active(registry: &HashMap<JobId, JobRecord>, args: &(String, String)) -> Option<JobId> {
        registry
            .iter()
            .find(|(_, record)| &record.args == args && !record.state.is_terminal())
            .map(|(id, _)| *id)
    }

    #[test]
    fn job_id_round_trips_through_its_string_form() {
        let id = JobId::new();
        let parsed = JobId::parse(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn invalid_job_id_string_is_rejected() {
        assert!(JobId::parse("not-a-uuid").is_err());
    }

    #[test]
    fn finds_an_active_job_with_matching_arguments() {
        let mut registry = HashMap::new();
        let pending = insert(&mut registry, ("example.com", "2020"), JobState::Pending { info: "queued".to_string() });

        let found = find_active(&registry, &("example.com".to_string(), "2020".to_string()));
        assert_eq!(found, Some(pending));
    }

    #[test]
    fn a_terminal_job_is_not_considered_active() {
        let mut registry = HashMap::new();
        insert(&mut registry, ("example.com", "2020"), JobState::Success { duration_secs: 3 });

        let found = find_active(&registry, &("example.com".to_string(), "2020".to_string()));
        assert!(found.is_none());
    }

    #[test]
    fn different_arguments_do_not_match() {
        let mut registry = HashMap::new();
        insert(&mut registry, ("example.com", "2020"), JobState::Pending { info: "queued".to_string() });

        let found = find_active(&registry, &("example.com".to_string(), "2021".to_string()));
        assert!(found.is_none());
    }

    #[test]
    fn registry_sink_writes_into_the_matching_record() {
        let mut registry = HashMap::new();
        let id = insert(&mut registry, ("example.com", "2020"), JobState::Pending { info: "queued".to_string() });
        let registry = Arc::new(Mutex::new(registry));

        let sink = RegistrySink { registry: Arc::clone(&registry), job_id: id };
        sink.update(JobState::Success { duration_secs: 7 });

        let state = registry.lock().unwrap().get(&id).unwrap().state.clone();
        assert_eq!(state, JobState::Success { duration_secs: 7 });
    }
}
