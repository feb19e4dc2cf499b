//! Error types for pulsecast.

use pulsecast_shared::FormatError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PulseError>;

#[derive(Error, Debug)]
pub enum PulseError {
    /// Channel-level failure. Fatal for a listener that can no longer
    /// receive; a producer's retry policy is up to the caller.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Undecodable payload. Listeners contain this per-datagram and
    /// never let it escape the loop.
    #[error("format error: {0}")]
    Format(#[from] FormatError),
}
