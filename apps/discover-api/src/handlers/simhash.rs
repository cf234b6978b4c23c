use crate::lookup::{self, TimestampOutcome, YearOutcome};
use crate::state::AppState;
use crate::validation::url_is_valid;
use axum::extract::{Query, State};
use axum::Json;
use discover_model::{compress_captures, Timestamp, UrlKey, Year};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

#[derive(Debug, Deserialize)]
pub struct SimhashQuery {
    pub url: Option<String>,
    pub timestamp: Option<String>,
    pub year: Option<String>,
    pub page: Option<String>,
    pub compress: Option<String>,
}

fn is_truthy(flag: &str) -> bool {
    flag == "true" || flag == "1"
}

pub async fn get_simhash(State(state): State<AppState>, Query(params): Query<SimhashQuery>) -> Json<Value> {
    let Some(url) = params.url.filter(|u| !u.is_empty()) else {
        return Json(json!({"status": "error", "info": "url param is required."}));
    };
    if !url_is_valid(&url) {
        return Json(json!({"status": "error", "info": "invalid url format."}));
    }
    let urlkey = match UrlKey::from_url(&url) {
        Ok(key) => key,
        Err(_) => return Json(json!({"status": "error", "info": "invalid url format."})),
    };

    if let Some(timestamp) = params.timestamp.filter(|t| !t.is_empty()) {
        return get_by_timestamp(&state, &url, &urlkey, &timestamp).await;
    }

    let Some(year_raw) = params.year.filter(|y| !y.is_empty()) else {
        return Json(json!({"status": "error", "info": "year param is required."}));
    };
    let Ok(year) = Year::parse(&year_raw) else {
        return Json(json!({"status": "error", "info": "year param must be numeric."}));
    };

    let page = match params.page.as_deref() {
        None => None,
        Some(raw) => match raw.parse::<usize>() {
            Ok(page) if page >= 1 => Some(page),
            _ => return Json(json!({"status": "error", "info": "pager param should be > 0."})),
        },
    };
    let compress = params.compress.as_deref().is_some_and(is_truthy);

    get_by_year(&state, &url, &urlkey, year, page, compress).await
}

async fn get_by_timestamp(state: &AppState, url: &str, urlkey: &UrlKey, timestamp: &str) -> Json<Value> {
    let outcome = match lookup::timestamp_lookup(&state.cache, urlkey, timestamp).await {
        Ok(outcome) => outcome,
        Err(err) => {
            warn!(url = %url, timestamp = %timestamp, error = %err, "cache read failed");
            return Json(json!({"status": "error", "info": "Cannot read cached data."}));
        }
    };

    let year_prefix: String = timestamp.chars().take(4).collect();
    match outcome {
        TimestampOutcome::Found { simhash } => {
            let status = if state.queue.active_job_for(url, &year_prefix).is_some() { "PENDING" } else { "COMPLETE" };
            Json(json!({"status": status, "captures": {"simhash": simhash}}))
        }
        TimestampOutcome::NoCaptures => Json(json!({"status": "error", "message": "NO_CAPTURES"})),
        TimestampOutcome::CaptureNotFound => Json(json!({"status": "error", "message": "CAPTURE_NOT_FOUND"})),
    }
}

async fn get_by_year(
    state: &AppState,
    url: &str,
    urlkey: &UrlKey,
    year: Year,
    page: Option<usize>,
    compress: bool,
) -> Json<Value> {
    state.metrics.incr_get_simhash_year_request();
    let per_page = state.config.snapshots.number_per_page;

    let outcome = match lookup::year_lookup(&state.cache, urlkey, year, page, per_page).await {
        Ok(outcome) => outcome,
        Err(err) => {
            warn!(url = %url, year = %year, error = %err, "cache read failed");
            return Json(json!({"status": "error", "info": "Cannot read cached data."}));
        }
    };

    let page = match outcome {
        YearOutcome::NotCaptured => return Json(json!({"status": "error", "message": "NOT_CAPTURED"})),
        YearOutcome::NoCaptures => return Json(json!({"status": "error", "message": "NO_CAPTURES"})),
        YearOutcome::Found(page) => page,
    };

    let year_str = year.as_str();
    let status = if state.queue.active_job_for(url, &year_str).is_some() { "PENDING" } else { "COMPLETE" };

    let mut output = json!({
        "status": status,
        "total_captures": page.total_captures,
    });

    if compress {
        let typed: Vec<(Timestamp, String)> = page
            .captures
            .iter()
            .filter_map(|(ts, enc)| Timestamp::parse(ts).ok().map(|ts| (ts, enc.clone())))
            .collect();
        let (captures, hashes) = compress_captures(&typed);
        output["captures"] = captures;
        output["hashes"] = json!(hashes);
    } else {
        let mut captures: Vec<Value> = page.captures.iter().map(|(ts, enc)| json!([ts, enc])).collect();
        if let Some(number_of_pages) = page.pages {
            captures.insert(0, json!(["pages", number_of_pages]));
        }
        output["captures"] = json!(captures);
    }

    Json(output)
}
