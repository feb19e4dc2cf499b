//! End-to-end producer → listener over an in-memory lossless channel.

use parking_lot::Mutex;
use pulsecast::{
    loopback_pair, run_listener, run_producer, DatagramChannel, LatencyStats, ListenerConfig,
    LoopbackChannel, ManualClock, ProducerConfig, SharedStats,
};
use pulsecast_shared::WireFormat;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Raises the stop flag once the queue runs dry, so the listener drains
/// everything the producer queued and then exits.
struct DrainChannel<'a> {
    inner: LoopbackChannel,
    stop: &'a AtomicBool,
}

impl DatagramChannel for DrainChannel<'_> {
    fn send(&mut self, data: &[u8]) -> io::Result<usize> {
        self.inner.send(data)
    }

    fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let result = self.inner.recv(buf);
        if result.is_err() {
            self.stop.store(true, Ordering::Relaxed);
        }
        result
    }
}

fn producer_config(format: WireFormat, count: u64) -> ProducerConfig {
    ProducerConfig {
        format,
        interval: Duration::ZERO,
        count: Some(count),
    }
}

fn fresh_stats() -> SharedStats {
    Arc::new(Mutex::new(LatencyStats::new()))
}

#[test]
fn counters_arrive_in_order_with_no_gaps() {
    for format in [WireFormat::Json, WireFormat::Binary] {
        let (mut tx, mut rx) = loopback_pair();
        let clock = ManualClock::new(1_000_000_000, 10);
        let stop = AtomicBool::new(false);

        let sent =
            run_producer(&mut tx, &clock, &producer_config(format, 20), &stop).unwrap();
        assert_eq!(sent, 20);

        let mut buf = [0u8; 2048];
        for expected in 0..20u32 {
            let n = rx.recv(&mut buf).unwrap();
            let msg = format.decode(&buf[..n]).unwrap();
            assert_eq!(msg.counter, expected, "gap or reorder at {expected}");
        }
    }
}

#[test]
fn stats_count_equals_messages_sent() {
    let (mut tx, rx) = loopback_pair();
    let clock = ManualClock::new(5_000_000_000, 100);
    let stop = AtomicBool::new(false);

    let sent = run_producer(
        &mut tx,
        &clock,
        &producer_config(WireFormat::Json, 50),
        &stop,
    )
    .unwrap();

    let stats = fresh_stats();
    let listen_stop = AtomicBool::new(false);
    let mut channel = DrainChannel {
        inner: rx,
        stop: &listen_stop,
    };
    let config = ListenerConfig {
        format: WireFormat::Json,
        report_every: 10,
    };
    let received = run_listener(&mut channel, &clock, &stats, &config, &listen_stop).unwrap();

    assert_eq!(received, sent);
    let snap = stats.lock().snapshot();
    assert_eq!(snap.count, sent);
    // Producer and listener share one stepped clock, so every latency is
    // positive and bounded.
    assert!(snap.min_ns > 0);
    assert_eq!(snap.negative, 0);
}

#[test]
fn listener_survives_interleaved_corrupt_datagram() {
    let (mut tx, rx) = loopback_pair();
    let clock = ManualClock::new(2_000_000_000, 10);
    let stop = AtomicBool::new(false);

    // 5 valid, then garbage of the wrong length, then 5 more valid.
    run_producer(
        &mut tx,
        &clock,
        &producer_config(WireFormat::Binary, 5),
        &stop,
    )
    .unwrap();
    tx.send(&[0xff; 7]).unwrap();
    run_producer(
        &mut tx,
        &clock,
        &producer_config(WireFormat::Binary, 5),
        &stop,
    )
    .unwrap();

    let stats = fresh_stats();
    let listen_stop = AtomicBool::new(false);
    let mut channel = DrainChannel {
        inner: rx,
        stop: &listen_stop,
    };
    let config = ListenerConfig {
        format: WireFormat::Binary,
        report_every: 0,
    };
    let received = run_listener(&mut channel, &clock, &stats, &config, &listen_stop).unwrap();

    assert_eq!(received, 10);
    assert_eq!(stats.lock().snapshot().count, 10);
}

#[test]
fn cross_format_traffic_is_contained() {
    // A JSON producer on a group a binary listener has joined: every
    // datagram is foreign, none crash the loop, stats stay empty.
    let (mut tx, rx) = loopback_pair();
    let clock = ManualClock::new(3_000_000_000, 10);
    let stop = AtomicBool::new(false);

    run_producer(
        &mut tx,
        &clock,
        &producer_config(WireFormat::Json, 5),
        &stop,
    )
    .unwrap();

    let stats = fresh_stats();
    let listen_stop = AtomicBool::new(false);
    let mut channel = DrainChannel {
        inner: rx,
        stop: &listen_stop,
    };
    let config = ListenerConfig {
        format: WireFormat::Binary,
        report_every: 0,
    };
    let received = run_listener(&mut channel, &clock, &stats, &config, &listen_stop).unwrap();

    assert_eq!(received, 0);
    assert_eq!(stats.lock().snapshot().count, 0);
}
