//! # pulsecast-shared
//!
//! Shared wire types for Pulsecast telemetry.
//!
//! This crate defines the logical message and the two encodings used on
//! the multicast group:
//!
//! - [`Message`]: the logical telemetry unit (send time, counter, payload)
//! - [`binary`]: fixed 21-byte big-endian encoding
//! - [`json`]: self-describing JSON encoding
//! - [`Status`]: closed status enum, one byte-code/label table for both codecs
//!
//! ## Usage
//!
//! ```rust
//! use pulsecast_shared::{binary, Message, Payload, Status, WIRE_SIZE};
//!
//! let msg = Message::new(1_700_000_000_000_000_000, 7, Payload {
//!     temperature: 25.5,
//!     humidity: 60.0,
//!     status: Status::Active,
//! });
//!
//! let bytes = binary::encode(&msg);
//! assert_eq!(bytes.len(), WIRE_SIZE);
//! assert_eq!(binary::decode(&bytes).unwrap(), msg);
//! ```

pub mod binary;
mod error;
mod format;
pub mod json;
mod message;
mod status;

pub use binary::WIRE_SIZE;
pub use error::{FormatError, Result};
pub use format::WireFormat;
pub use message::{Message, Payload};
pub use status::Status;
