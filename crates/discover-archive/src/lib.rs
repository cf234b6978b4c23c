//! Change-log (timemap) client and capture fetcher. Both share a pooled
//! `reqwest::Client` (see [`ArchivePool`]) the way a single worker's HTTP
//! connections are meant to be reused across an entire job.

mod capture;
mod client;
mod errors;
mod timemap;

pub use capture::{fetch_capture, FetchOutcome};
pub use client::{ArchivePool, DEFAULT_CAPTURE_BASE, DEFAULT_TIMEMAP_BASE};
pub use errors::ArchiveError;
pub use timemap::{timemap, TimemapResult};
