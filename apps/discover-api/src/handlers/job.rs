use crate::state::AppState;
use axum::extract::{Query, State};
use axum::Json;
use discover_model::JobInfo;
use discover_queue::JobId;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
pub struct JobQuery {
    pub job_id: Option<String>,
}

pub async fn job_status(State(state): State<AppState>, Query(params): Query<JobQuery>) -> Json<Value> {
    let Some(raw_job_id) = params.job_id.filter(|id| !id.is_empty()) else {
        return Json(json!({"status": "error", "info": "job_id param is required."}));
    };
    let Ok(job_id) = JobId::parse(&raw_job_id) else {
        return Json(json!({"status": "error", "info": "Cannot get status."}));
    };

    state.metrics.incr_status_request();

    let Some(job_state) = state.queue.status(job_id) else {
        return Json(json!({"status": "error", "info": "Cannot get status."}));
    };

    // Decode the state's heterogeneous payload once, at this boundary.
    match job_state.info() {
        JobInfo::Progress(info) => Json(json!({"status": "PENDING", "job_id": raw_job_id, "info": info})),
        JobInfo::DurationSecs(duration_secs) => {
            Json(json!({"status": "SUCCESS", "job_id": raw_job_id, "duration": duration_secs}))
        }
        JobInfo::ErrorReason(reason) => {
            Json(json!({"status": "error", "job_id": raw_job_id, "info": reason}))
        }
        JobInfo::None => Json(json!({"status": "error", "job_id": raw_job_id, "info": Value::Null})),
    }
}
