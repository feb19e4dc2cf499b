//! Listener loop: receive, stamp, decode, track latency.

use crate::channel::DatagramChannel;
use crate::clock::Clock;
use crate::stats::SharedStats;
use crate::Result;
use pulsecast_shared::WireFormat;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

/// Recv buffer size per packet (> MTU 1500)
const RECV_PACKET_SIZE: usize = 2048;

/// How many leading bytes to hex-dump when a datagram fails to decode
const DUMP_PREFIX_LEN: usize = 16;

/// Listener loop configuration.
#[derive(Debug, Clone)]
pub struct ListenerConfig {
    /// Wire encoding expected on the group
    pub format: WireFormat,
    /// Emit a stats snapshot every N valid messages (0 = never)
    pub report_every: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            format: WireFormat::Json,
            report_every: 10,
        }
    }
}

fn hex_prefix(data: &[u8]) -> String {
    let shown = data.len().min(DUMP_PREFIX_LEN);
    let mut out = String::with_capacity(shown * 3);
    for (i, byte) in data[..shown].iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&format!("{:02x}", byte));
    }
    if data.len() > shown {
        out.push_str(" ..");
    }
    out
}

/// Run the listener until `stop` is set.
///
/// Arrival time is stamped before decoding so decode cost never inflates
/// the measured latency. Undecodable datagrams (foreign traffic, wrong
/// format, truncation) are logged with length and leading-bytes context
/// and dropped; they never terminate the loop. Channel read timeouts are
/// the stop-flag poll points; any other channel error is fatal.
///
/// Returns the number of valid messages processed.
pub fn run_listener<C, K>(
    channel: &mut C,
    clock: &K,
    stats: &SharedStats,
    config: &ListenerConfig,
    stop: &AtomicBool,
) -> Result<u64>
where
    C: DatagramChannel,
    K: Clock,
{
    let mut buf = [0u8; RECV_PACKET_SIZE];
    let mut received: u64 = 0;

    info!(format = %config.format, "listener started");

    while !stop.load(Ordering::Relaxed) {
        let len = match channel.recv(&mut buf) {
            Ok(len) => len,
            Err(e)
                if e.kind() == io::ErrorKind::TimedOut
                    || e.kind() == io::ErrorKind::WouldBlock =>
            {
                continue;
            }
            Err(e) => {
                warn!(error = %e, "channel failure, listener stopping");
                return Err(e.into());
            }
        };

        // Stamp before decode.
        let arrival = clock.now_ns();
        let datagram = &buf[..len];

        let msg = match config.format.decode(datagram) {
            Ok(msg) => msg,
            Err(e) => {
                warn!(
                    len,
                    prefix = %hex_prefix(datagram),
                    error = %e,
                    "dropped undecodable datagram"
                );
                continue;
            }
        };

        let latency = arrival as i64 - msg.send_time as i64;
        if latency < 0 {
            warn!(
                counter = msg.counter,
                latency_ns = latency,
                "receive time precedes send time (clock skew)"
            );
        }
        debug!(counter = msg.counter, latency_ns = latency, "received message");

        stats.lock().observe(msg.send_time, arrival);
        received += 1;

        if config.report_every > 0 && received % config.report_every == 0 {
            info!(stats = %stats.lock().snapshot(), "latency report");
        }
    }

    info!(stats = %stats.lock().snapshot(), received, "listener stopped");
    Ok(received)
}
