//! eventline server
//!
//! HTTP front end for the event lifecycle coordinator, backed by the
//! in-memory store.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use eventline_core::impls::{CountingSink, InMemoryEventStore, TracingSink};
use eventline_core::ports::SystemClock;
use eventline_core::{EventCoordinator, EventRuntime, RuntimeConfig};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod http;

use http::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Buffer writes in the task queue and answer 202.
    Queued,
    /// Apply writes inline and answer with their outcome.
    Direct,
}

/// Event lifecycle coordinator server.
#[derive(Parser, Debug)]
#[command(name = "eventline", about = "Event lifecycle coordinator server")]
struct Args {
    /// HTTP listen address
    #[arg(long, env = "EVENTLINE_ADDR", default_value = "0.0.0.0:8080")]
    addr: SocketAddr,

    /// Number of queue workers
    #[arg(long, env = "EVENTLINE_WORKERS", default_value = "50")]
    workers: usize,

    /// Maximum number of buffered tasks
    #[arg(long, env = "EVENTLINE_QUEUE_CAPACITY", default_value = "500")]
    queue_capacity: usize,

    /// Seconds to wait for the queue to drain on shutdown
    #[arg(long, env = "EVENTLINE_DRAIN_TIMEOUT_SECS", default_value = "10")]
    drain_timeout_secs: u64,

    /// Log filter, used when RUST_LOG is not set
    #[arg(long, env = "EVENTLINE_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// How write requests are processed
    #[arg(long, env = "EVENTLINE_MODE", value_enum, default_value_t = Mode::Queued)]
    mode: Mode,
}

impl Args {
    fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            queue_capacity: self.queue_capacity,
            workers: self.workers,
            drain_timeout_secs: self.drain_timeout_secs,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let store = Arc::new(InMemoryEventStore::new());
    let coordinator = Arc::new(EventCoordinator::new(store, Arc::new(SystemClock)));
    let sink = Arc::new(CountingSink::wrapping(Arc::new(TracingSink)));

    let runtime = match args.mode {
        Mode::Queued => Some(EventRuntime::start(
            &args.runtime_config(),
            coordinator.clone(),
            sink.clone(),
        )?),
        Mode::Direct => None,
    };

    let state = Arc::new(AppState {
        coordinator,
        submitter: runtime.as_ref().map(EventRuntime::submitter),
    });
    let router = http::create_router(state);

    let listener = TcpListener::bind(args.addr).await?;
    info!(addr = %args.addr, mode = ?args.mode, "HTTP server listening");

    if let Err(e) = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(error = %e, "HTTP server error");
    }

    if let Some(runtime) = runtime {
        let drained = runtime.shutdown().await;
        let counts = sink.counts();
        info!(
            drained,
            processed = counts.processed,
            failed = counts.failed,
            abandoned = counts.abandoned,
            "task processing stopped"
        );
    }

    info!("eventline stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(e) => error!(error = %e, "failed to listen for ctrl-c"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["eventline"]).unwrap();
        assert_eq!(args.mode, Mode::Queued);
        assert_eq!(args.runtime_config(), RuntimeConfig::default());
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::try_parse_from([
            "eventline",
            "--workers",
            "4",
            "--queue-capacity",
            "16",
            "--mode",
            "direct",
        ])
        .unwrap();

        assert_eq!(args.mode, Mode::Direct);
        let config = args.runtime_config();
        assert_eq!(config.workers, 4);
        assert_eq!(config.queue_capacity, 16);
    }
}
