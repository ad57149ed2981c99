//! Function API Server
//!
//! Serves the REST router until a shutdown signal arrives.

use crate::error::{Error, Result};
use axum::extract::DefaultBodyLimit;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::rest::RestRouter;
use crate::function::StorageFunction;
use crate::metrics::FunctionMetrics;

// =============================================================================
// Server Configuration
// =============================================================================

/// Configuration for the API server
#[derive(Debug, Clone)]
pub struct ApiServerConfig {
    /// REST API bind address
    pub addr: SocketAddr,
    /// Max request body size
    pub max_body_size: usize,
}

impl Default for ApiServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 9443)),
            max_body_size: 10 * 1024 * 1024, // 10MB
        }
    }
}

// =============================================================================
// API Server
// =============================================================================

/// API server running the function over HTTP
pub struct ApiServer {
    config: ApiServerConfig,
    function: Arc<StorageFunction>,
    metrics: Arc<FunctionMetrics>,
    shutdown_tx: broadcast::Sender<()>,
}

impl ApiServer {
    /// Create a new API server
    pub fn new(
        config: ApiServerConfig,
        function: Arc<StorageFunction>,
        metrics: Arc<FunctionMetrics>,
    ) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);

        Self {
            config,
            function,
            metrics,
            shutdown_tx,
        }
    }

    /// Build the router with its middleware
    pub fn router(&self) -> axum::Router {
        RestRouter::new(self.function.clone(), self.metrics.clone())
            .build()
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(DefaultBodyLimit::max(self.config.max_body_size)),
            )
    }

    /// Run the API server until shutdown
    pub async fn run(&self) -> Result<()> {
        let addr = self.config.addr;
        let app = self.router();
        let mut shutdown_rx = self.shutdown_tx.subscribe();

        let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
            Error::Internal(format!("Failed to bind REST server: {}", e))
        })?;

        info!("Function API listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
                info!("Function API shutting down");
            })
            .await
            .map_err(|e| Error::Internal(format!("REST server error: {}", e)))?;

        Ok(())
    }

    /// Handle for triggering graceful shutdown from another task
    pub fn shutdown_handle(&self) -> broadcast::Sender<()> {
        self.shutdown_tx.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::{CompositionConfig, Scheme};
    use std::time::Duration;

    fn server(addr: SocketAddr) -> Arc<ApiServer> {
        let function =
            StorageFunction::new(CompositionConfig::default(), Arc::new(Scheme::ionos()));
        let metrics = Arc::new(FunctionMetrics::new().unwrap());
        Arc::new(ApiServer::new(
            ApiServerConfig {
                addr,
                ..Default::default()
            },
            function,
            metrics,
        ))
    }

    #[test]
    fn test_default_config() {
        let config = ApiServerConfig::default();
        assert_eq!(config.addr.port(), 9443);
        assert_eq!(config.max_body_size, 10 * 1024 * 1024);
    }

    #[tokio::test]
    async fn test_graceful_shutdown() {
        let server = server(SocketAddr::from(([127, 0, 0, 1], 0)));
        let handle = server.shutdown_handle();

        let running = server.clone();
        let task = tokio::spawn(async move { running.run().await });

        tokio::time::sleep(Duration::from_millis(50)).await;
        let _ = handle.send(());

        let result = tokio::time::timeout(Duration::from_secs(5), task)
            .await
            .expect("server did not stop")
            .unwrap();
        assert!(result.is_ok());
    }
}
