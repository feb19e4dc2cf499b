//! Nanosecond clock seam.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Nanosecond-resolution time source.
///
/// Producer and listener must share an epoch for one-way latency to mean
/// anything, so the wall clock is the reference (same choice as stamping
/// with `time.time_ns()` on the peer side). Within one process run the
/// readings are non-decreasing for all practical purposes.
pub trait Clock {
    /// Current time in nanoseconds since the Unix epoch.
    fn now_ns(&self) -> u64;
}

/// Wall-clock time source used by the binaries.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ns(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    }
}

/// Deterministic clock for tests: starts at a base value and advances by
/// a fixed step on every reading.
#[derive(Debug)]
pub struct ManualClock {
    next: AtomicU64,
    step: u64,
}

impl ManualClock {
    pub fn new(start_ns: u64, step_ns: u64) -> Self {
        Self {
            next: AtomicU64::new(start_ns),
            step: step_ns,
        }
    }
}

impl Clock for ManualClock {
    fn now_ns(&self) -> u64 {
        self.next.fetch_add(self.step, Ordering::Relaxed)
    }
}
