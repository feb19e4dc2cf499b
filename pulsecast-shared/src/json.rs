//! Self-describing JSON encoding.
//!
//! Field names travel with the values, so independently built peers can
//! decode without agreeing on byte offsets. Required on decode:
//! `send_time` (integer), `counter` (integer), `data.temperature`,
//! `data.humidity`, `data.status` (known label). Extra fields are
//! tolerated; `timestamp` is optional and informational only.

use crate::{Message, Result};

/// Serialize a message to a JSON string.
pub fn encode(msg: &Message) -> Result<String> {
    Ok(serde_json::to_string(msg)?)
}

/// Parse a message from raw datagram bytes.
///
/// Malformed UTF-8, malformed JSON, missing required fields, wrong field
/// types, and unknown status labels all reject with [`FormatError`].
///
/// [`FormatError`]: crate::FormatError
pub fn decode(buf: &[u8]) -> Result<Message> {
    let text = std::str::from_utf8(buf)?;
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Payload, Status};

    fn sample() -> Message {
        Message::new(
            1_700_000_000_000_000_000,
            3,
            Payload {
                temperature: 26.5,
                humidity: 63.0,
                status: Status::Active,
            },
        )
        .with_timestamp("2023-11-14T22:13:20Z")
    }

    #[test]
    fn test_roundtrip() {
        let msg = sample();
        let text = encode(&msg).unwrap();
        assert_eq!(decode(text.as_bytes()).unwrap(), msg);
    }

    #[test]
    fn test_timestamp_optional() {
        let text = r#"{"send_time":123,"counter":0,
            "data":{"temperature":25.5,"humidity":60.0,"status":"active"}}"#;
        let msg = decode(text.as_bytes()).unwrap();
        assert_eq!(msg.timestamp, None);
        assert_eq!(msg.send_time, 123);
    }

    #[test]
    fn test_extra_fields_tolerated() {
        let text = r#"{"send_time":1,"counter":2,"source":"node-7",
            "data":{"temperature":1.0,"humidity":2.0,"status":"idle","rssi":-40}}"#;
        let msg = decode(text.as_bytes()).unwrap();
        assert_eq!(msg.counter, 2);
        assert_eq!(msg.data.status, Status::Idle);
    }

    #[test]
    fn test_missing_send_time_rejected() {
        let text = r#"{"counter":0,
            "data":{"temperature":25.5,"humidity":60.0,"status":"active"}}"#;
        assert!(decode(text.as_bytes()).is_err());
    }

    #[test]
    fn test_non_numeric_counter_rejected() {
        let text = r#"{"send_time":1,"counter":"three",
            "data":{"temperature":25.5,"humidity":60.0,"status":"active"}}"#;
        assert!(decode(text.as_bytes()).is_err());
    }

    #[test]
    fn test_unknown_status_label_rejected() {
        let text = r#"{"send_time":1,"counter":0,
            "data":{"temperature":25.5,"humidity":60.0,"status":"rebooting"}}"#;
        assert!(decode(text.as_bytes()).is_err());
    }

    #[test]
    fn test_malformed_syntax_rejected() {
        assert!(decode(b"{not json").is_err());
        assert!(decode(&[0xff, 0xfe, 0x00]).is_err());
    }
}
