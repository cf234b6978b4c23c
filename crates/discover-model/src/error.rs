use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("timestamp must be exactly 14 digits, got {0:?}")]
    InvalidTimestamp(String),

    #[error("unsupported simhash width {0}, expected one of 64, 128, 256, 512")]
    InvalidWidth(u32),

    #[error("fingerprint byte length {actual} does not match width {expected_bits} bits")]
    LengthMismatch { actual: usize, expected_bits: u32 },

    #[error("invalid base64 fingerprint encoding: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),
}
