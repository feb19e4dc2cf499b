//! Pulsecast CLI.
//!
//! Terminal 1: pulsecast listen 239.0.0.1 5000 --format binary
//! Terminal 2: pulsecast send 239.0.0.1 5000 --format binary --interval 0.5

use clap::{Parser, Subcommand};
use parking_lot::Mutex;
use pulsecast::{
    run_listener, run_producer, LatencyStats, ListenerConfig, MulticastChannel, ProducerConfig,
    SystemClock,
};
use pulsecast_shared::WireFormat;
use std::net::Ipv4Addr;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Read timeout for the listener socket; bounds how long a shutdown
/// signal can go unnoticed between packets.
const READ_TIMEOUT: Duration = Duration::from_millis(500);

#[derive(Parser)]
#[command(name = "pulsecast", version, about = "UDP multicast telemetry probe")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Send telemetry messages to a multicast group
    Send {
        /// Multicast group address (e.g. 239.0.0.1)
        group: Ipv4Addr,
        /// Port to send to
        port: u16,
        /// Seconds between messages
        #[arg(long, default_value_t = 1.0)]
        interval: f64,
        /// Time-to-live (hop limit) for multicast packets
        #[arg(long, default_value_t = 1)]
        ttl: u32,
        /// Wire format: json or binary
        #[arg(long, default_value = "json")]
        format: WireFormat,
        /// Stop after this many messages (default: run until killed)
        #[arg(long)]
        count: Option<u64>,
        /// Receive own messages (single-host testing)
        #[arg(long)]
        loopback: bool,
    },
    /// Listen for telemetry messages and report one-way latency
    Listen {
        /// Multicast group address (e.g. 239.0.0.1)
        group: Ipv4Addr,
        /// Port to listen on
        port: u16,
        /// Wire format: json or binary
        #[arg(long, default_value = "json")]
        format: WireFormat,
        /// Emit a latency report every N messages
        #[arg(long, default_value_t = 10)]
        report_every: u64,
    },
}

fn run(cli: Cli) -> pulsecast::Result<()> {
    let clock = SystemClock;
    // Loops run until killed unless a count bounds them.
    let stop = AtomicBool::new(false);

    match cli.command {
        Command::Send {
            group,
            port,
            interval,
            ttl,
            format,
            count,
            loopback,
        } => {
            if !interval.is_finite() || interval < 0.0 {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("interval must be a non-negative number of seconds, got {interval}"),
                )
                .into());
            }

            let mut channel = MulticastChannel::sender(group, port)?;
            channel.set_ttl(ttl)?;
            channel.set_loopback(loopback)?;
            tracing::info!(%group, port, ttl, "sending to multicast group");

            let config = ProducerConfig {
                format,
                interval: Duration::from_secs_f64(interval),
                count,
            };
            run_producer(&mut channel, &clock, &config, &stop)?;
        }
        Command::Listen {
            group,
            port,
            format,
            report_every,
        } => {
            let mut channel = MulticastChannel::listener(group, port, READ_TIMEOUT)?;
            tracing::info!(%group, port, "joined multicast group");

            let stats = Arc::new(Mutex::new(LatencyStats::new()));
            let config = ListenerConfig {
                format,
                report_every,
            };
            run_listener(&mut channel, &clock, &stats, &config, &stop)?;
        }
    }

    Ok(())
}

fn main() -> std::process::ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "fatal");
            std::process::ExitCode::FAILURE
        }
    }
}
