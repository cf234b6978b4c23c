//! Shared data types for the discover pipeline.
//!
//! Nothing in this crate touches the network, the cache, or a task broker —
//! it only defines the vocabulary (`urlkey`, timestamps, fingerprints,
//! feature vectors, job state) the other crates exchange.

mod capture;
mod compress;
mod error;
mod feature;
mod fingerprint;
mod job;
mod timestamp;
mod urlkey;

pub use capture::{CaptureRecord, YearEntry};
pub use compress::compress_captures;
pub use error::ModelError;
pub use feature::FeatureVector;
pub use fingerprint::{Fingerprint, Width};
pub use job::{JobInfo, JobState};
pub use timestamp::{Digest, Timestamp, Year};
pub use urlkey::{parse_lenient, UrlKey};
