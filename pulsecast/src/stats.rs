//! One-way latency statistics.
//!
//! The tracker is an explicit object owned by the listener; when the
//! report timer runs on its own thread it is shared as
//! [`SharedStats`] and every operation holds the lock only briefly.
//!
//! Percentiles are exact: every sample is retained and sorted on
//! snapshot, so memory grows linearly with messages received. At the
//! sub-kHz rates this tool targets that is a few megabytes per hour;
//! [`LatencyStats::reset`] frees it.

use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// Tracker shared between the receive path and a reporting thread.
pub type SharedStats = Arc<Mutex<LatencyStats>>;

/// Running one-way latency aggregate.
///
/// Samples are signed: a receiver clock behind the sender produces a
/// negative delta, which is recorded and counted rather than rejected —
/// losing those samples would hide the clock skew they diagnose.
#[derive(Debug, Default)]
pub struct LatencyStats {
    samples: Vec<i64>,
    sum: i128,
    min: i64,
    max: i64,
    negative: u64,
}

/// Point-in-time view of the tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatencySnapshot {
    pub count: u64,
    pub min_ns: i64,
    pub max_ns: i64,
    pub mean_ns: f64,
    pub stddev_ns: f64,
    pub p50_ns: i64,
    pub p90_ns: i64,
    pub p99_ns: i64,
    /// Samples where receive time preceded send time (clock skew)
    pub negative: u64,
}

impl LatencyStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one send/receive pair.
    pub fn observe(&mut self, send_time_ns: u64, receive_time_ns: u64) {
        let delta = receive_time_ns as i64 - send_time_ns as i64;
        if delta < 0 {
            self.negative += 1;
        }
        if self.samples.is_empty() {
            self.min = delta;
            self.max = delta;
        } else {
            self.min = self.min.min(delta);
            self.max = self.max.max(delta);
        }
        self.sum += delta as i128;
        self.samples.push(delta);
    }

    /// Number of samples observed since the last reset.
    pub fn count(&self) -> u64 {
        self.samples.len() as u64
    }

    /// Point-in-time aggregate. Safe to call on an empty tracker.
    pub fn snapshot(&self) -> LatencySnapshot {
        let count = self.samples.len() as u64;
        if count == 0 {
            return LatencySnapshot {
                count: 0,
                min_ns: 0,
                max_ns: 0,
                mean_ns: 0.0,
                stddev_ns: 0.0,
                p50_ns: 0,
                p90_ns: 0,
                p99_ns: 0,
                negative: self.negative,
            };
        }

        let mean = self.sum as f64 / count as f64;
        let variance = self
            .samples
            .iter()
            .map(|&s| {
                let d = s as f64 - mean;
                d * d
            })
            .sum::<f64>()
            / count as f64;

        let mut sorted = self.samples.clone();
        sorted.sort_unstable();

        LatencySnapshot {
            count,
            min_ns: self.min,
            max_ns: self.max,
            mean_ns: mean,
            stddev_ns: variance.sqrt(),
            p50_ns: percentile(&sorted, 50.0),
            p90_ns: percentile(&sorted, 90.0),
            p99_ns: percentile(&sorted, 99.0),
            negative: self.negative,
        }
    }

    /// Clear all accumulated state, including retained samples.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Nearest-rank percentile over an already-sorted slice.
fn percentile(sorted: &[i64], p: f64) -> i64 {
    debug_assert!(!sorted.is_empty());
    let rank = (p / 100.0 * sorted.len() as f64).ceil() as usize;
    sorted[rank.max(1) - 1]
}

impl fmt::Display for LatencySnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.count == 0 {
            return write!(f, "no messages received yet");
        }
        write!(
            f,
            "count={} min={}ns max={}ns mean={:.0}ns stddev={:.0}ns \
             p50={}ns p90={}ns p99={}ns",
            self.count,
            self.min_ns,
            self.max_ns,
            self.mean_ns,
            self.stddev_ns,
            self.p50_ns,
            self.p90_ns,
            self.p99_ns,
        )?;
        if self.negative > 0 {
            write!(f, " negative={} (clock skew)", self.negative)?;
        }
        Ok(())
    }
}
