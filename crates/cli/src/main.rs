// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! wsop - remote operator agent
//!
//! Connects to a hub, registers as a transform operator, and answers
//! transform requests until the connection closes or the process is
//! interrupted.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod config;
mod env;
mod exit_error;

use anyhow::Result;
use clap::Parser;
use tokio_util::sync::CancellationToken;
use wsop_adapters::transport::DEFAULT_HOST_PORT;
use wsop_adapters::WsConnector;
use wsop_engine::{Runtime, SessionEnd};

use crate::config::Settings;
use crate::exit_error::ExitError;

#[derive(Parser)]
#[command(name = "wsop", version, about = "Storm amplifier operator for a signal hub")]
struct Cli {
    /// Hub address as host:port or host (a full ws:// URL is also accepted)
    #[arg(default_value = DEFAULT_HOST_PORT)]
    target: String,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        match e.downcast_ref::<ExitError>() {
            Some(exit) => {
                eprintln!("Error: {}", exit.message);
                std::process::exit(exit.code);
            }
            None => {
                eprintln!("Error: {e:#}");
                std::process::exit(1);
            }
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{fmt, EnvFilter};

    // Default to info but quiet down the websocket stack unless overridden by RUST_LOG
    let default_filter = "info,tungstenite=warn,tokio_tungstenite=warn";
    let _ = tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

#[tokio::main]
async fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load(&cli.target)
        .map_err(|e| ExitError::new(2, e.to_string()))?;
    tracing::info!(
        endpoint = %settings.agent.endpoint,
        agent_id = %settings.agent.agent_id,
        capabilities = %settings.agent.capabilities,
        "🌩️ storm amplifier operator starting"
    );

    let shutdown = CancellationToken::new();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("interrupt received");
                shutdown.cancel();
            }
        }
    });

    let runtime = Runtime::new(WsConnector::new(settings.connect_timeout), settings.agent);
    match runtime.run(shutdown).await {
        Ok(SessionEnd::Closed { code, reason }) => {
            tracing::info!(?code, %reason, "hub closed the connection");
            Ok(())
        }
        Ok(SessionEnd::Failed(e)) => {
            tracing::warn!(error = %e, "connection lost");
            Ok(())
        }
        Ok(SessionEnd::Shutdown) => Ok(()),
        Err(e) => Err(ExitError::new(1, e.to_string()).into()),
    }
}
