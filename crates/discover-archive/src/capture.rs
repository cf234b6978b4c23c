use crate::client::{send_with_retries, ArchivePool};
use crate::errors::ArchiveError;
use discover_model::Timestamp;
use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use tracing::instrument;

const MAX_RETRIES: u32 = 2;

/// Outcome of fetching one archived capture body. `Rejected` (wrong
/// content-type) is deliberately not an error: spec §4.6 only counts
/// transport-level or non-2xx outcomes against the job's soft
/// circuit-breaker.
pub enum FetchOutcome {
    Body(Vec<u8>),
    Rejected,
    Failed(ArchiveError),
}

/// Downloads the archived body for `(timestamp, url)` in identity (`id_`)
/// mode — no archive link rewriting — capping the read at
/// `max_capture_bytes`.
#[instrument(skip(pool))]
pub async fn fetch_capture(
    pool: &ArchivePool,
    timestamp: &Timestamp,
    url: &str,
    max_capture_bytes: usize,
) -> FetchOutcome {
    let capture_url = format!("{}/{}id_/{}", pool.capture_base, timestamp.as_str(), url);

    let response = match send_with_retries(MAX_RETRIES, || pool.http.get(&capture_url).send()).await {
        Ok(response) => response,
        Err(err) => return FetchOutcome::Failed(ArchiveError::from(err)),
    };

    if !response.status().is_success() {
        return FetchOutcome::Failed(ArchiveError::NonSuccessStatus(response.status()));
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
        .to_ascii_lowercase();

    if !(content_type.contains("text") || content_type.contains("html")) {
        return FetchOutcome::Rejected;
    }

    let mut body = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        match chunk {
            Ok(bytes) => {
                body.extend_from_slice(&bytes);
                if body.len() >= max_capture_bytes {
                    body.truncate(max_capture_bytes);
                    break;
                }
            }
            Err(err) => return FetchOutcome::Failed(ArchiveError::from(err)),
        }
    }

    FetchOutcome::Body(body)
}
