use crate::client::{send_with_retries, ArchivePool};
use crate::errors::ArchiveError;
use discover_model::{CaptureRecord, Digest, Timestamp, Year};
use tracing::instrument;

const MAX_RETRIES: u32 = 2;

/// Result of querying the change-log for a `(url, year)` window.
pub enum TimemapResult {
    Captures(Vec<CaptureRecord>),
    Empty,
}

/// Queries the archive's timemap index for every capture of `url` in `year`,
/// collapsed to at most three per day, optionally capped at
/// `snapshots_per_year` (pass `None` for unlimited).
#[instrument(skip(pool))]
pub async fn timemap(
    pool: &ArchivePool,
    url: &str,
    year: Year,
    snapshots_per_year: Option<u32>,
) -> Result<TimemapResult, ArchiveError> {
    let year_str = year.as_str();
    let mut query = vec![
        ("url".to_string(), url.to_string()),
        ("from".to_string(), year_str.clone()),
        ("to".to_string(), year_str.clone()),
        ("filter".to_string(), "statuscode:200".to_string()),
        ("fl".to_string(), "timestamp,digest".to_string()),
        // Collapse on the first 9 timestamp characters keeps at most three
        // captures per day (YYYYMMDDh).
        ("collapse".to_string(), "timestamp:9".to_string()),
    ];
    if let Some(limit) = snapshots_per_year {
        query.push(("limit".to_string(), limit.to_string()));
    }

    let response = send_with_retries(MAX_RETRIES, || {
        pool.http.get(&pool.timemap_base).query(&query).send()
    })
    .await?;

    if !response.status().is_success() {
        return Err(ArchiveError::NonSuccessStatus(response.status()));
    }

    let body = response.text().await?;
    parse_timemap_body(&body)
}

fn parse_timemap_body(body: &str) -> Result<TimemapResult, ArchiveError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Ok(TimemapResult::Empty);
    }

    let mut records = Vec::new();
    for line in trimmed.lines() {
        let mut parts = line.split_whitespace();
        let (Some(ts), Some(digest)) = (parts.next(), parts.next()) else {
            return Err(ArchiveError::MalformedLine(line.to_string()));
        };
        let timestamp = Timestamp::parse(ts)
            .map_err(|_| ArchiveError::MalformedLine(line.to_string()))?;
        records.push(CaptureRecord::new(timestamp, Digest::new(digest)));
    }

    if records.is_empty() {
        Ok(TimemapResult::Empty)
    } else {
        Ok(TimemapResult::Captures(records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_is_empty() {
        matches!(parse_timemap_body("").unwrap(), TimemapResult::Empty);
        matches!(parse_timemap_body("   \n  ").unwrap(), TimemapResult::Empty);
    }

    #[test]
    fn parses_timestamp_digest_pairs() {
        let body = "20141021062411 ABCDEF\n20150101000000 GHIJKL\n";
        match parse_timemap_body(body).unwrap() {
            TimemapResult::Captures(records) => {
                assert_eq!(records.len(), 2);
                assert_eq!(records[0].timestamp.as_str(), "20141021062411");
                assert_eq!(records[0].digest.as_str(), "ABCDEF");
            }
            TimemapResult::Empty => panic!("expected captures"),
        }
    }

    #[test]
    fn malformed_line_is_an_error() {
        assert!(parse_timemap_body("not-a-valid-line").is_err());
    }
}
