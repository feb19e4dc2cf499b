//! Fixed-width binary encoding.
//!
//! Every message is exactly 21 bytes, all fields big-endian:
//!
//! ```text
//! Offset  Size  Field
//! 0       8     send_time    (u64, nanoseconds since Unix epoch)
//! 8       4     counter      (u32)
//! 12      4     temperature  (f32, IEEE-754)
//! 16      4     humidity     (f32, IEEE-754)
//! 20      1     status       (u8, see [`Status`])
//! ```

use crate::{FormatError, Message, Payload, Result, Status};

/// Binary wire size in bytes.
pub const WIRE_SIZE: usize = 21;

/// Serialize a message to its 21-byte wire form.
///
/// Never fails: [`Status`] is a closed enum, so every value has a code,
/// and the informational timestamp is simply not carried.
#[inline]
pub fn encode(msg: &Message) -> [u8; WIRE_SIZE] {
    let mut buf = [0u8; WIRE_SIZE];
    buf[0..8].copy_from_slice(&msg.send_time.to_be_bytes());
    buf[8..12].copy_from_slice(&msg.counter.to_be_bytes());
    buf[12..16].copy_from_slice(&msg.data.temperature.to_be_bytes());
    buf[16..20].copy_from_slice(&msg.data.humidity.to_be_bytes());
    buf[20] = msg.data.status.as_u8();
    buf
}

/// Parse a message from its wire form.
///
/// Rejects any input that is not exactly 21 bytes, and any status byte
/// outside the known table.
#[inline]
pub fn decode(buf: &[u8]) -> Result<Message> {
    if buf.len() != WIRE_SIZE {
        return Err(FormatError::Length {
            expected: WIRE_SIZE,
            actual: buf.len(),
        });
    }

    let send_time = u64::from_be_bytes([
        buf[0], buf[1], buf[2], buf[3], buf[4], buf[5], buf[6], buf[7],
    ]);
    let counter = u32::from_be_bytes([buf[8], buf[9], buf[10], buf[11]]);
    let temperature = f32::from_be_bytes([buf[12], buf[13], buf[14], buf[15]]);
    let humidity = f32::from_be_bytes([buf[16], buf[17], buf[18], buf[19]]);
    let status = Status::try_from(buf[20])?;

    Ok(Message::new(
        send_time,
        counter,
        Payload {
            temperature,
            humidity,
            status,
        },
    ))
}
