//! homepage-ab
//!
//! A small reverse proxy that runs a two-way homepage experiment.
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌──────────────────────────────────────────────┐
//!                         │                 HOMEPAGE-AB                  │
//!                         │                                              │
//!   Client Request        │  ┌────────┐   ┌─────────┐   ┌────────────┐   │
//!   ──────────────────────┼─▶│  http  │──▶│ routing │──▶│  homepage  │   │
//!                         │  │ server │   │ matcher │   │  assign +  │   │
//!                         │  └────────┘   └────┬────┘   │  fetch doc │   │
//!                         │                    │ other  └─────┬──────┘   │
//!                         │                    ▼              ▼          │
//!   Client Response       │              ┌──────────────────────────┐    │     Static
//!   ◀─────────────────────┼──────────────│      origin client       │◀───┼──── File Host
//!                         │              └──────────────────────────┘    │
//!                         │                                              │
//!                         │  config · observability · security · signals │
//!                         └──────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use homepage_ab::config::{load_config, AbConfig};
use homepage_ab::lifecycle::signals::spawn_signal_listener;
use homepage_ab::net::load_tls_config;
use homepage_ab::observability::{logging, metrics};
use homepage_ab::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "homepage-ab")]
#[command(about = "A/B testing proxy for a static marketing homepage", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. Built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AbConfig::default(),
    };

    logging::init(&config.observability);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "homepage-ab starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        origin = %config.origin.base_url,
        matcher = ?config.matcher.mode,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let shutdown = Shutdown::new();
    spawn_signal_listener(shutdown.clone());

    let tls = config.listener.tls.clone();
    let bind_address = config.listener.bind_address.clone();
    let server = HttpServer::new(config)?;

    match tls {
        Some(tls) => {
            let addr: SocketAddr = bind_address.parse()?;
            let rustls = load_tls_config(&tls).await?;
            server.run_tls(addr, rustls, shutdown.subscribe()).await?;
        }
        None => {
            let listener = TcpListener::bind(&bind_address).await?;
            tracing::info!(address = %listener.local_addr()?, "Listening for connections");
            server.run(listener, shutdown.subscribe()).await?;
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
