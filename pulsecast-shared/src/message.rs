//! Logical telemetry message, independent of wire encoding.

use crate::Status;
use serde::{Deserialize, Serialize};

/// Sensor readings carried by every message.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    /// Degrees Celsius
    pub temperature: f32,
    /// Relative humidity, percent
    pub humidity: f32,
    /// Device status
    pub status: Status,
}

/// One telemetry message, sent once per producer tick.
///
/// `send_time` is the latency reference: wall-clock nanoseconds since the
/// Unix epoch, stamped immediately before transmission and non-decreasing
/// within one producer run. `timestamp` is an informational RFC 3339
/// string carried only by the JSON encoding; latency never derives from
/// it because it has no nanosecond resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Human-readable capture time (JSON only, optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Nanoseconds since the Unix epoch, stamped just before send
    pub send_time: u64,
    /// Per-producer sequence number, wraps at u32::MAX
    pub counter: u32,
    /// Sensor readings
    pub data: Payload,
}

impl Message {
    /// Create a message without the informational timestamp.
    pub fn new(send_time: u64, counter: u32, data: Payload) -> Self {
        Self {
            timestamp: None,
            send_time,
            counter,
            data,
        }
    }

    /// Attach the informational capture time.
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }
}
