//! Error types for pulsecast-shared.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FormatError>;

/// Malformed or undecodable payload.
///
/// Always recoverable: a listener logs the datagram and keeps running.
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("wrong length: expected {expected} bytes, got {actual}")]
    Length { expected: usize, actual: usize },

    #[error("unknown status code {0}")]
    UnknownStatusCode(u8),

    #[error("unknown format {0:?} (expected \"json\" or \"binary\")")]
    UnknownFormat(String),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}
