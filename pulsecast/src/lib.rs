//! # pulsecast
//!
//! UDP multicast telemetry probe with one-way latency statistics.
//!
//! A producer broadcasts one [`Message`] per tick to a multicast group in
//! either JSON or a fixed 21-byte binary encoding; a listener joins the
//! group, stamps each datagram's arrival before decoding, and folds
//! `arrival - send_time` into running latency statistics.
//!
//! ```text
//! producer loop → WireFormat::encode → multicast group
//!                                          │
//!              listener loop ← recv ───────┘
//!                   │ stamp arrival, decode
//!                   ▼
//!              LatencyStats → periodic snapshot report
//! ```
//!
//! The loops talk to the network only through the [`DatagramChannel`]
//! trait, so tests drive them over an in-memory loopback pair instead of
//! real sockets.
//!
//! [`Message`]: pulsecast_shared::Message

pub mod channel;
pub mod clock;
mod error;
pub mod listener;
pub mod multicast;
pub mod producer;
pub mod stats;

pub use channel::{loopback_pair, DatagramChannel, LoopbackChannel};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{PulseError, Result};
pub use listener::{run_listener, ListenerConfig};
pub use multicast::MulticastChannel;
pub use producer::{run_producer, ProducerConfig};
pub use stats::{LatencySnapshot, LatencyStats, SharedStats};
