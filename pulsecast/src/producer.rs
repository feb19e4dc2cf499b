//! Producer loop: build, encode, send on a fixed interval.

use crate::channel::DatagramChannel;
use crate::clock::Clock;
use crate::Result;
use pulsecast_shared::{Message, Payload, Status, WireFormat};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Producer loop configuration.
#[derive(Debug, Clone)]
pub struct ProducerConfig {
    /// Wire encoding for every message
    pub format: WireFormat,
    /// Delay between messages
    pub interval: Duration,
    /// Stop after this many messages; `None` runs until the stop flag
    pub count: Option<u64>,
}

impl Default for ProducerConfig {
    fn default() -> Self {
        Self {
            format: WireFormat::Json,
            interval: Duration::from_secs(1),
            count: None,
        }
    }
}

/// Synthetic telemetry readings for a given sequence number: a sawtooth
/// over plausible room values, status always healthy.
fn sample_payload(counter: u32) -> Payload {
    Payload {
        temperature: 25.5 + (counter % 10) as f32,
        humidity: 60.0 + (counter % 20) as f32,
        status: Status::Active,
    }
}

/// Run the producer until `count` messages are sent or `stop` is set.
///
/// Each tick: stamp `send_time`, build the message, encode, send. The
/// counter starts at 0 and wraps at the u32 boundary. Send failures
/// propagate to the caller, whose retry policy this loop does not guess.
///
/// Returns the number of messages sent.
pub fn run_producer<C, K>(
    channel: &mut C,
    clock: &K,
    config: &ProducerConfig,
    stop: &AtomicBool,
) -> Result<u64>
where
    C: DatagramChannel,
    K: Clock,
{
    let mut counter: u32 = 0;
    let mut sent: u64 = 0;

    info!(format = %config.format, interval = ?config.interval, "producer started");

    while !stop.load(Ordering::Relaxed) {
        if let Some(limit) = config.count {
            if sent >= limit {
                break;
            }
        }

        let timestamp = chrono::Utc::now().to_rfc3339();
        let send_time = clock.now_ns();
        let msg = Message::new(send_time, counter, sample_payload(counter))
            .with_timestamp(timestamp);

        let encode_start = Instant::now();
        let bytes = config.format.encode(&msg)?;
        let encode_ns = encode_start.elapsed().as_nanos() as u64;

        let send_start = Instant::now();
        channel.send(&bytes)?;
        let send_ns = send_start.elapsed().as_nanos() as u64;

        debug!(
            counter,
            len = bytes.len(),
            encode_ns,
            send_ns,
            "sent message"
        );

        counter = counter.wrapping_add(1);
        sent += 1;

        if !config.interval.is_zero() {
            std::thread::sleep(config.interval);
        }
    }

    info!(sent, "producer stopped");
    Ok(sent)
}
