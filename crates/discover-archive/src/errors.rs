use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("transport error contacting the archive: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("archive responded with status {0}")]
    NonSuccessStatus(reqwest::StatusCode),

    #[error("malformed timemap line: {0:?}")]
    MalformedLine(String),
}
