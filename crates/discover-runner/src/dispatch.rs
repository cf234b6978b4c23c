use crate::metrics::JobMetrics;
use discover_archive::{fetch_capture, ArchivePool, FetchOutcome};
use discover_model::{CaptureRecord, Width};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use tracing::warn;

/// Runs the per-capture routine for one change-log entry: dedup against
/// `seen`, respect the soft circuit-breaker, fetch and fingerprint
/// otherwise. Returns `None` when the capture contributes nothing to the
/// job's result map.
#[allow(clippy::too_many_arguments)]
pub(crate) async fn process_capture(
    archive: &ArchivePool,
    url: &str,
    record: &CaptureRecord,
    seen: &Mutex<HashMap<String, String>>,
    error_counter: &AtomicU32,
    max_download_errors: u32,
    max_capture_bytes: usize,
    width: Width,
    metrics: &dyn JobMetrics,
) -> Option<(String, String)> {
    let digest = record.digest.as_str().to_string();
    let timestamp = record.timestamp.as_str().to_string();

    if let Some(encoded) = seen.lock().unwrap().get(&digest).cloned() {
        return Some((timestamp, encoded));
    }

    if error_counter.load(Ordering::Relaxed) >= max_download_errors {
        return None;
    }

    match fetch_capture(archive, &record.timestamp, url, max_capture_bytes).await {
        FetchOutcome::Rejected => None,
        FetchOutcome::Failed(err) => {
            let tripped_at = error_counter.fetch_add(1, Ordering::Relaxed) + 1;
            metrics.incr_download_error();
            if tripped_at == max_download_errors {
                metrics.incr_multiple_consecutive_errors();
            }
            warn!(timestamp = %timestamp, error = %err, "capture fetch failed");
            None
        }
        FetchOutcome::Body(bytes) => {
            metrics.incr_download_capture();
            let features = discover_features::extract(&bytes);
            if features.is_empty() {
                return None;
            }
            let fingerprint = discover_simhash::simhash(&features, width);
            metrics.incr_calculate_simhash();
            let encoded = fingerprint.encode_base64();
            seen.lock().unwrap().insert(digest, encoded.clone());
            Some((timestamp, encoded))
        }
    }
}
