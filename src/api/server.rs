//! HTTP/WebSocket server using Axum
//!
//! Serves the static client, a health endpoint, and the per-room WebSocket
//! upgrade path.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use tokio::sync::watch;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument};

use crate::config::{Config, ServerConfig};
use crate::error::{Result, ScrawlError};
use crate::hub::{ColorPalette, Hub};

use super::middleware::cors_layer;
use super::routes;

/// Shared state for handlers
#[derive(Clone)]
pub struct AppState {
    pub hub: Arc<Hub>,
    pub palette: Arc<ColorPalette>,
    pub config: Config,
    pub started_at: Instant,
}

/// The whiteboard server
pub struct ApiServer {
    config: ServerConfig,
    state: AppState,
}

impl ApiServer {
    /// Create a new server
    pub fn new(
        server_config: ServerConfig,
        full_config: Config,
        hub: Arc<Hub>,
        palette: Arc<ColorPalette>,
    ) -> Self {
        let state = AppState {
            hub,
            palette,
            config: full_config,
            started_at: Instant::now(),
        };

        Self {
            config: server_config,
            state,
        }
    }

    /// Build the router
    fn build_router(&self) -> Router {
        let cors = cors_layer(&self.config.cors_origins);

        routes::create_router(self.state.clone())
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until the shutdown signal flips
    #[instrument(skip(self, shutdown))]
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> Result<()> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .map_err(|_| {
                ScrawlError::InvalidConfig(format!(
                    "invalid bind address {}:{}",
                    self.config.host, self.config.port
                ))
            })?;

        let router = self.build_router();

        info!("Scrawl server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;

        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.changed().await;
            })
            .await
            .map_err(|e| ScrawlError::Internal(e.to_string()))?;

        info!("Scrawl server shut down");
        Ok(())
    }
}
