use discover_model::JobState;

/// Receives the state transitions a job goes through. The task queue adapter
/// implements this to persist state where `status(job_id)` can observe it;
/// tests can install a simple in-memory recorder instead.
pub trait JobSink: Send + Sync {
    fn update(&self, state: JobState);
}

/// A sink that drops every update. Useful for tests that only care about the
/// final [`crate::JobOutcome`].
pub struct NullSink;

impl JobSink for NullSink {
    fn update(&self, _state: JobState) {}
}
