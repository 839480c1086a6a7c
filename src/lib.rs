//! Stock Price Checker
//!
//! HTTP service that looks up current stock prices through a quote proxy
//! and records one anonymous "like" per client per symbol.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod quotes;
pub mod security;
pub mod state;

use anyhow::Context;
use api::ApiServer;
use config::AppConfig;
use state::AppState;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging (`RUST_LOG` overrides the default filter)
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stock_price_checker=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// Run the service until Ctrl-C
pub async fn run() -> anyhow::Result<()> {
    init_tracing();

    tracing::info!("Starting Stock Price Checker...");

    let config = AppConfig::from_env().context("failed to load configuration")?;
    let addr = config.addr()?;

    let app_state = Arc::new(
        AppState::from_config(&config).context("failed to initialize application state")?,
    );
    tracing::info!("Application state initialized");

    let mut server = ApiServer::new(app_state);
    server
        .start(addr)
        .await
        .with_context(|| format!("failed to start API server on {}", addr))?;

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;

    tracing::info!("Shutdown signal received");
    server.stop();
    server.wait().await?;

    tracing::info!("Stock Price Checker stopped");
    Ok(())
}
