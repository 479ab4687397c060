//! VAIJÁ edge gateway.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────┐
//!                     │                   GATEWAY                    │
//!   Client Request    │  ┌─────────┐   ┌──────────┐   ┌───────────┐  │
//!  ───────────────────┼─▶│  http   │──▶│ routing  │──▶│ handlers  │  │
//!                     │  │ server  │   │  table   │   │ validate  │  │
//!                     │  └─────────┘   └──────────┘   └─────┬─────┘  │
//!                     │                                     │        │
//!                     │                    ┌────────────────┴─────┐  │
//!                     │                    ▼                      ▼  │
//!                     │             ┌────────────┐       ┌──────────┐│    Data store
//!                     │             │ datastore  │──────▶│ messaging│├──▶ / Messaging
//!                     │             │  adapter   │       │ adapter  ││    gateway
//!                     │             └────────────┘       └──────────┘│
//!   Client Response   │  ┌──────────────────────┐                    │
//!  ◀──────────────────┼──│ response (JSON+CORS) │◀── error boundary  │
//!                     │  └──────────────────────┘                    │
//!                     └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use vaija_gateway::config::{load_config, loader};
use vaija_gateway::observability::{logging, metrics};
use vaija_gateway::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "vaija-gateway")]
#[command(about = "Edge HTTP gateway for deliveries and WhatsApp messaging", long_about = None)]
struct Args {
    /// TOML configuration file; defaults plus environment when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => loader::from_env()?,
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability)?;
    tracing::info!("vaija-gateway v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        upstream_timeout_secs = config.timeouts.upstream_secs,
        datastore_configured = config.datastore.url().is_some(),
        messaging_account_set = config.messaging.account_sid().is_some(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics endpoint");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.triggered_or_signal()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
