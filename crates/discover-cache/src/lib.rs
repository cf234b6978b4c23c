//! Cache store mapping a canonicalized `urlkey` to the set of fingerprints
//! computed for it so far, plus the year-sentinel convention recording
//! "this year had no captures". Backed by Redis.

mod client;
mod errors;

pub use client::CacheStore;
pub use errors::CacheError;
