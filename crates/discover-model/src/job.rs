/// Heterogeneous progress payload the task queue carries alongside a job's
/// raw state. Decoded once at the API boundary rather than passed around as
/// an untyped blob (spec §9 "dynamic dispatch on task.info").
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobInfo {
    Progress(String),
    ErrorReason(String),
    DurationSecs(u64),
    None,
}

/// The terminal and non-terminal states a submitted `(url, year)` job can be
/// in. `Pending` is the only non-terminal state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobState {
    Pending { info: String },
    Success { duration_secs: u64 },
    Error { reason: String },
}

impl JobState {
    pub fn label(&self) -> &'static str {
        match self {
            JobState::Pending { .. } => "PENDING",
            JobState::Success { .. } => "SUCCESS",
            JobState::Error { .. } => "ERROR",
        }
    }

    pub fn info(&self) -> JobInfo {
        match self {
            JobState::Pending { info } => JobInfo::Progress(info.clone()),
            JobState::Success { duration_secs } => JobInfo::DurationSecs(*duration_secs),
            JobState::Error { reason } => JobInfo::ErrorReason(reason.clone()),
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, JobState::Pending { .. })
    }
}
