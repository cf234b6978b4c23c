use crate::error::ModelError;
use std::fmt;

/// A 14-digit `YYYYMMDDhhmmss` capture timestamp, UTC. Lexicographic order on
/// the underlying string is chronological order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(String);

impl Timestamp {
    pub fn parse(raw: &str) -> Result<Self, ModelError> {
        if raw.len() == 14 && raw.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Timestamp(raw.to_string()))
        } else {
            Err(ModelError::InvalidTimestamp(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn year(&self) -> &str {
        &self.0[0..4]
    }

    /// Last six digits (`hhmmss`), used by the compressed-captures format.
    pub fn hms(&self) -> &str {
        &self.0[8..14]
    }

    pub fn month(&self) -> &str {
        &self.0[4..6]
    }

    pub fn day(&self) -> &str {
        &self.0[6..8]
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A 4-digit calendar year, as used both for change-log queries and the
/// year-sentinel cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Year(u16);

impl Year {
    pub fn parse(raw: &str) -> Result<Self, ModelError> {
        let trimmed = raw.trim();
        if trimmed.len() != 4 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ModelError::InvalidTimestamp(raw.to_string()));
        }
        trimmed
            .parse::<u16>()
            .map(Year)
            .map_err(|_| ModelError::InvalidTimestamp(raw.to_string()))
    }

    pub fn as_str(&self) -> String {
        format!("{:04}", self.0)
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

/// Opaque content identifier assigned by the archive. Identical digests mean
/// identical capture bodies.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Digest(String);

impl Digest {
    pub fn new(raw: impl Into<String>) -> Self {
        Digest(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_wrong_length() {
        assert!(Timestamp::parse("2014102106241").is_err());
    }

    #[test]
    fn extracts_year_and_hms() {
        let ts = Timestamp::parse("20141021062411").unwrap();
        assert_eq!(ts.year(), "2014");
        assert_eq!(ts.hms(), "062411");
    }

    #[test]
    fn lexicographic_order_is_chronological() {
        let a = Timestamp::parse("20140101000000").unwrap();
        let b = Timestamp::parse("20150101000000").unwrap();
        assert!(a < b);
    }
}
