//! Wire format selection.

use crate::{binary, json, FormatError, Message, Result};
use std::fmt;
use std::str::FromStr;

/// Which encoding a producer/listener pair speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WireFormat {
    /// Self-describing JSON text
    #[default]
    Json,
    /// Fixed 21-byte big-endian layout
    Binary,
}

impl WireFormat {
    /// Encode a message in this format.
    pub fn encode(self, msg: &Message) -> Result<Vec<u8>> {
        match self {
            Self::Json => Ok(json::encode(msg)?.into_bytes()),
            Self::Binary => Ok(binary::encode(msg).to_vec()),
        }
    }

    /// Decode a datagram in this format.
    pub fn decode(self, buf: &[u8]) -> Result<Message> {
        match self {
            Self::Json => json::decode(buf),
            Self::Binary => binary::decode(buf),
        }
    }
}

impl FromStr for WireFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "json" => Ok(Self::Json),
            "binary" => Ok(Self::Binary),
            other => Err(FormatError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for WireFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "json",
            Self::Binary => "binary",
        })
    }
}
