//! eth-gateway
//!
//! A small REST façade over an Ethereum JSON-RPC node, built with Tokio,
//! Axum and alloy.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────┐
//!                     │                  GATEWAY                     │
//!   Client Request    │  ┌─────────┐   ┌──────────┐   ┌───────────┐  │
//!   ──────────────────┼─▶│ request │──▶│ handlers │──▶│ blockchain│──┼──▶ Node (JSON-RPC)
//!                     │  │ id/trace│   │ validate │   │  client   │  │
//!                     │  └─────────┘   └────┬─────┘   └───────────┘  │
//!                     │                     │                        │
//!                     │                     ├──▶ wallet (ephemeral)  │
//!                     │                     └──▶ keystore (on disk)  │
//!   Client Response   │  ┌─────────┐        │                        │
//!   ◀─────────────────┼──│response │◀───────┘                        │
//!                     │  │  JSON   │                                 │
//!                     │  └─────────┘                                 │
//!                     │  config · observability · lifecycle          │
//!                     └──────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;

use eth_gateway::config::load_config;
use eth_gateway::lifecycle::{self, Shutdown};
use eth_gateway::observability::logging::init_tracing;

#[derive(Parser)]
#[command(name = "eth-gateway")]
#[command(about = "REST gateway over an Ethereum JSON-RPC node", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long, env = "GATEWAY_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is fine; the environment may already be set
    dotenv::dotenv().ok();

    let args = Args::parse();
    let config = load_config(args.config.as_deref(), args.bind.as_deref())?;

    init_tracing(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        failover_urls = config.blockchain.failover_urls.len(),
        rpc_timeout_secs = config.blockchain.rpc_timeout_secs,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    lifecycle::run(config, shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
