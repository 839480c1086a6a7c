//! HTTP server for the stock price API

use crate::api::handlers;
use crate::error::{AppError, Result};
use crate::state::AppState;
use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Build the API router with all routes and middleware
pub fn build_router(state: Arc<AppState>) -> Router {
    // Public API, callable from any origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/", get(handlers::health_check))
        .route("/api/stock-prices", get(handlers::stock_prices))
        .with_state(state)
        .layer(CatchPanicLayer::custom(handlers::handle_panic))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// API server manager
pub struct ApiServer {
    state: Arc<AppState>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
    local_addr: Option<SocketAddr>,
}

impl ApiServer {
    /// Create a new server
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            shutdown_tx: None,
            task: None,
            local_addr: None,
        }
    }

    /// Bind `addr` and start serving in the background.
    ///
    /// Returns the bound address, which differs from `addr` when port 0 is used.
    pub async fn start(&mut self, addr: SocketAddr) -> Result<SocketAddr> {
        if self.is_running() {
            return Err(AppError::Internal("API server already running".to_string()));
        }

        let app = build_router(self.state.clone());

        let listener = tokio::net::TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;

        // Create shutdown channel
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        info!("Starting stock price API server on {}", local_addr);

        let task = tokio::spawn(async move {
            let server = axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
                info!("API server shutting down");
            });

            if let Err(e) = server.await {
                error!("API server error: {}", e);
            }
        });

        self.shutdown_tx = Some(shutdown_tx);
        self.task = Some(task);
        self.local_addr = Some(local_addr);

        info!("=== Endpoints ===");
        info!("  GET  http://{}/health", local_addr);
        info!("  GET  http://{}/api/stock-prices?stock=GOOG&like=true", local_addr);
        info!("  GET  http://{}/api/stock-prices?stock=GOOG&stock=MSFT", local_addr);

        Ok(local_addr)
    }

    /// Stop the server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            info!("API server stop signal sent");
        }
    }

    /// Wait for the serving task to finish (after `stop`, or on a server error)
    pub async fn wait(&mut self) -> Result<()> {
        if let Some(task) = self.task.take() {
            task.await
                .map_err(|e| AppError::Internal(format!("API server task failed: {}", e)))?;
        }
        self.local_addr = None;
        Ok(())
    }

    /// Check if server is running
    pub fn is_running(&self) -> bool {
        self.shutdown_tx.is_some()
    }

    /// Address the server is bound to, while running
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }
}

impl Drop for ApiServer {
    fn drop(&mut self) {
        self.stop();
    }
}
