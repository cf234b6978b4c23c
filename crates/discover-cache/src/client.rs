use crate::errors::CacheError;
use discover_model::{UrlKey, Year, YearEntry};
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use std::collections::HashMap;
use std::time::Duration;
use tracing::instrument;

/// Keyed map from `urlkey` to a Redis hash of `timestamp -> encoded
/// fingerprint`, with a year-sentinel convention layered on top (spec §3).
///
/// Backed by `redis::aio::ConnectionManager`, which reconnects and
/// multiplexes transparently, so a single clone can be shared across every
/// worker the way the teacher shares one pooled database handle.
#[derive(Clone)]
pub struct CacheStore {
    connection: ConnectionManager,
}

impl CacheStore {
    #[instrument(skip(redis_url))]
    pub async fn connect(redis_url: &str) -> Result<Self, CacheError> {
        let client = redis::Client::open(redis_url).map_err(CacheError::Connection)?;
        let connection = client
            .get_connection_manager()
            .await
            .map_err(CacheError::Connection)?;
        Ok(CacheStore { connection })
    }

    /// Writes every `(timestamp, encoded_fingerprint)` pair in one atomic
    /// batch and resets the group's TTL. All entries land together or none
    /// do.
    #[instrument(skip(self, entries))]
    pub async fn put_many(
        &self,
        urlkey: &UrlKey,
        entries: &HashMap<String, String>,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        if entries.is_empty() {
            return Ok(());
        }
        let mut pipe = redis::pipe();
        pipe.atomic();
        let mut conn = self.connection.clone();
        let pairs: Vec<(&String, &String)> = entries.iter().collect();
        pipe.hset_multiple(urlkey.as_str(), &pairs);
        pipe.expire(urlkey.as_str(), ttl.as_secs() as i64);
        pipe.query_async::<()>(&mut conn).await?;
        Ok(())
    }

    /// Writes the year sentinel (`-1`) recording "no captures this year".
    #[instrument(skip(self))]
    pub async fn put_year_sentinel(&self, urlkey: &UrlKey, year: Year, ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.connection.clone();
        let mut pipe = redis::pipe();
        pipe.atomic();
        pipe.hset(urlkey.as_str(), year.as_str(), YearEntry::Sentinel.to_stored());
        pipe.expire(urlkey.as_str(), ttl.as_secs() as i64);
        pipe.query_async::<()>(&mut conn).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, urlkey: &UrlKey, field: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.connection.clone();
        let value: Option<String> = conn.hget(urlkey.as_str(), field).await?;
        Ok(value)
    }

    #[instrument(skip(self))]
    pub async fn keys(&self, urlkey: &UrlKey) -> Result<Vec<String>, CacheError> {
        let mut conn = self.connection.clone();
        let keys: Vec<String> = conn.hkeys(urlkey.as_str()).await?;
        Ok(keys)
    }

    /// Fetches several fields at once, preserving input order; missing
    /// fields come back as `None` at their original position.
    #[instrument(skip(self, timestamps))]
    pub async fn multi_get(
        &self,
        urlkey: &UrlKey,
        timestamps: &[String],
    ) -> Result<Vec<(String, Option<String>)>, CacheError> {
        if timestamps.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.connection.clone();
        let values: Vec<Option<String>> = redis::cmd("HMGET")
            .arg(urlkey.as_str())
            .arg(timestamps)
            .query_async(&mut conn)
            .await?;
        Ok(timestamps.iter().cloned().zip(values).collect())
    }

    /// Timestamps whose year prefix matches `year`, via `keys` + filter —
    /// there is no secondary index, the hash is small enough per `urlkey`
    /// that a linear scan is cheap.
    #[instrument(skip(self))]
    pub async fn scan_year(&self, urlkey: &UrlKey, year: Year) -> Result<Vec<String>, CacheError> {
        let all_keys = self.keys(urlkey).await?;
        let prefix = year.as_str();
        Ok(all_keys.into_iter().filter(|k| is_timestamp_in_year(k, &prefix)).collect())
    }
}

/// A field belongs to `year` if it is a full 14-digit timestamp starting
/// with it; the year-sentinel field itself (4 digits) never matches.
fn is_timestamp_in_year(field: &str, year_prefix: &str) -> bool {
    field.len() == 14 && field.starts_with(year_prefix)
}

#[cfg(test)]
mod tests {
    use super::is_timestamp_in_year;

    #[test]
    fn matches_full_timestamp_in_year() {
        assert!(is_timestamp_in_year("20160615120000", "2016"));
    }

    #[test]
    fn rejects_other_years() {
        assert!(!is_timestamp_in_year("20150615120000", "2016"));
    }

    #[test]
    fn ignores_the_sentinel_field_itself() {
        assert!(!is_timestamp_in_year("2016", "2016"));
    }
}
