use discover_cache::{CacheError, CacheStore};
use discover_model::{UrlKey, Year};

pub enum TimestampOutcome {
    Found { simhash: String },
    NoCaptures,
    CaptureNotFound,
}

/// Mirrors the original's `timestamp_simhash`: an exact hit on the
/// timestamp field wins, otherwise a hit on the year-sentinel field means
/// the year was processed and came up empty, otherwise nothing is known
/// about this timestamp at all.
pub async fn timestamp_lookup(
    cache: &CacheStore,
    urlkey: &UrlKey,
    timestamp: &str,
) -> Result<TimestampOutcome, CacheError> {
    if let Some(value) = cache.get(urlkey, timestamp).await? {
        return Ok(TimestampOutcome::Found { simhash: value });
    }
    let year_prefix: String = timestamp.chars().take(4).collect();
    if cache.get(urlkey, &year_prefix).await?.is_some() {
        return Ok(TimestampOutcome::NoCaptures);
    }
    Ok(TimestampOutcome::CaptureNotFound)
}

pub struct YearPage {
    pub captures: Vec<(String, String)>,
    pub total_captures: usize,
    pub pages: Option<usize>,
}

pub enum YearOutcome {
    Found(YearPage),
    NoCaptures,
    NotCaptured,
}

/// Mirrors the original's `year_simhash` + `handle_results`: an empty hash
/// means nothing was ever captured; a sentinel field equal to the year
/// itself means the year was processed and came up empty; otherwise every
/// 14-digit field starting with the year is a real capture, optionally
/// paginated.
pub async fn year_lookup(
    cache: &CacheStore,
    urlkey: &UrlKey,
    year: Year,
    page: Option<usize>,
    per_page: usize,
) -> Result<YearOutcome, CacheError> {
    let keys = cache.keys(urlkey).await?;
    if keys.is_empty() {
        return Ok(YearOutcome::NotCaptured);
    }

    let year_str = year.as_str();
    if keys.iter().any(|k| k == &year_str) {
        return Ok(YearOutcome::NoCaptures);
    }

    let mut timestamps: Vec<String> =
        keys.into_iter().filter(|k| k.len() == 14 && k.starts_with(year_str.as_str())).collect();
    if timestamps.is_empty() {
        return Ok(YearOutcome::NotCaptured);
    }
    timestamps.sort();

    let total_captures = timestamps.len();
    let mut pages = None;
    if let Some(requested_page) = page {
        let number_of_pages = ((total_captures + per_page - 1) / per_page).max(1);
        let clamped_page = requested_page.clamp(1, number_of_pages);
        let start = (clamped_page - 1) * per_page;
        let end = (clamped_page * per_page).min(total_captures);
        timestamps = timestamps[start..end].to_vec();
        pages = Some(number_of_pages);
    }

    let pairs = cache.multi_get(urlkey, &timestamps).await?;
    let captures = pairs.into_iter().filter_map(|(ts, value)| value.map(|v| (ts, v))).collect();
    Ok(YearOutcome::Found(YearPage { captures, total_captures, pages }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_math_matches_the_original_ceiling_division() {
        let per_page = 100usize;
        let total = 250usize;
        let number_of_pages = (total + per_page - 1) / per_page;
        assert_eq!(number_of_pages, 3);
    }
}
