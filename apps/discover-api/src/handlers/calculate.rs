use crate::state::AppState;
use crate::validation::url_is_valid;
use axum::extract::{Query, State};
use axum::Json;
use discover_model::Year;
use discover_queue::SubmitOutcome;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
pub struct CalculateQuery {
    pub url: Option<String>,
    pub year: Option<String>,
}

pub async fn calculate_simhash(State(state): State<AppState>, Query(params): Query<CalculateQuery>) -> Json<Value> {
    let Some(url) = params.url.filter(|u| !u.is_empty()) else {
        return Json(json!({"status": "error", "info": "url param is required."}));
    };
    if !url_is_valid(&url) {
        return Json(json!({"status": "error", "info": "invalid url format."}));
    }
    let Some(year_raw) = params.year.filter(|y| !y.is_empty()) else {
        return Json(json!({"status": "error", "info": "year param is required."}));
    };
    let Ok(year) = Year::parse(&year_raw) else {
        return Json(json!({"status": "error", "info": "year param must be numeric."}));
    };
    let year_str = year.as_str();

    state.metrics.incr_calculate_simhash_year_request();

    if let Some(existing) = state.queue.active_job_for(&url, &year_str) {
        return Json(json!({"status": "PENDING", "job_id": existing.to_string()}));
    }

    match state.queue.submit(url, year_str) {
        SubmitOutcome::Started(job_id) => Json(json!({"status": "started", "job_id": job_id.to_string()})),
        SubmitOutcome::AlreadyPending(job_id) => Json(json!({"status": "PENDING", "job_id": job_id.to_string()})),
    }
}
