use crate::timestamp::{Digest, Timestamp};

/// A single entry returned by the change-log client: a capture's timestamp
/// and the content digest the archive recorded for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureRecord {
    pub timestamp: Timestamp,
    pub digest: Digest,
}

impl CaptureRecord {
    pub fn new(timestamp: Timestamp, digest: Digest) -> Self {
        CaptureRecord { timestamp, digest }
    }
}

/// The value stored for a single timestamp entry under a `urlkey`: either a
/// computed fingerprint (base64-encoded, transport-ready) or the year
/// sentinel recording "no captures this year".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YearEntry {
    Fingerprint(String),
    Sentinel,
}

impl YearEntry {
    pub const SENTINEL_VALUE: &'static str = "-1";

    pub fn from_stored(raw: &str) -> Self {
        if raw == Self::SENTINEL_VALUE {
            YearEntry::Sentinel
        } else {
            YearEntry::Fingerprint(raw.to_string())
        }
    }

    pub fn to_stored(&self) -> &str {
        match self {
            YearEntry::Fingerprint(encoded) => encoded,
            YearEntry::Sentinel => Self::SENTINEL_VALUE,
        }
    }
}
