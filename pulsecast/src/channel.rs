//! Datagram channel seam.
//!
//! The producer and listener loops never touch sockets directly; they
//! speak [`DatagramChannel`]. The multicast transport implements it over
//! UDP, and [`loopback_pair`] provides a lossless in-memory equivalent
//! for deterministic tests.

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::io;
use std::sync::Arc;

/// One already-configured datagram endpoint.
///
/// Both calls map 1:1 onto datagrams: one `send` is one packet on the
/// wire, one `recv` returns exactly one packet. `recv` blocks until a
/// packet arrives or a read timeout elapses (`ErrorKind::TimedOut` /
/// `WouldBlock`), which is what lets the listener loop poll its stop
/// flag between reads.
pub trait DatagramChannel {
    /// Send one datagram. Returns bytes written.
    fn send(&mut self, data: &[u8]) -> io::Result<usize>;

    /// Receive one datagram into `buf`. Returns bytes read.
    fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}

type Queue = Arc<Mutex<VecDeque<Vec<u8>>>>;

/// In-memory datagram endpoint, one half of a [`loopback_pair`].
///
/// Lossless and ordered; an empty queue reads as `ErrorKind::TimedOut`
/// so loop code sees the same shape as a socket with a read timeout.
pub struct LoopbackChannel {
    incoming: Queue,
    outgoing: Queue,
}

/// Create a connected pair of in-memory channels.
pub fn loopback_pair() -> (LoopbackChannel, LoopbackChannel) {
    let a: Queue = Arc::new(Mutex::new(VecDeque::new()));
    let b: Queue = Arc::new(Mutex::new(VecDeque::new()));
    (
        LoopbackChannel {
            incoming: a.clone(),
            outgoing: b.clone(),
        },
        LoopbackChannel {
            incoming: b,
            outgoing: a,
        },
    )
}

impl DatagramChannel for LoopbackChannel {
    fn send(&mut self, data: &[u8]) -> io::Result<usize> {
        self.outgoing.lock().push_back(data.to_vec());
        Ok(data.len())
    }

    fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.incoming.lock().pop_front() {
            Some(datagram) => {
                let len = datagram.len().min(buf.len());
                buf[..len].copy_from_slice(&datagram[..len]);
                Ok(len)
            }
            None => Err(io::Error::new(io::ErrorKind::TimedOut, "queue empty")),
        }
    }
}
