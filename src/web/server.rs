//! Web server assembly.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::domain::models::Config;
use crate::services::SessionStore;

use super::handlers;

/// Shared state for the web handlers.
pub struct AppState {
    /// Application configuration.
    pub config: Arc<Config>,
    /// Live sessions.
    pub sessions: SessionStore,
}

/// The form-based web UI server.
pub struct WebServer {
    config: Arc<Config>,
    sessions: SessionStore,
}

impl WebServer {
    /// Create a server from loaded configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            sessions: SessionStore::new(),
        }
    }

    /// Build the router with all routes and middleware.
    pub fn build_router(&self) -> Router {
        let state = Arc::new(AppState {
            config: self.config.clone(),
            sessions: self.sessions.clone(),
        });

        Router::new()
            .route("/", get(handlers::index))
            .route("/keys", post(handlers::submit_keys))
            .route("/reset", post(handlers::reset_keys))
            .route("/summary", post(handlers::generate_summary))
            .route("/download", get(handlers::download_summary))
            .route("/health", get(handlers::health))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// Start the server and run until the process is stopped.
    pub async fn serve(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr: SocketAddr =
            format!("{}:{}", self.config.server.host, self.config.server.port).parse()?;
        let router = self.build_router();

        tracing::info!("issuebrief listening on http://{}", addr);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, router).await?;
        Ok(())
    }

    /// Start the server with a shutdown signal.
    pub async fn serve_with_shutdown<F>(
        self,
        shutdown: F,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr: SocketAddr =
            format!("{}:{}", self.config.server.host, self.config.server.port).parse()?;
        let router = self.build_router();

        tracing::info!("issuebrief listening on http://{}", addr);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;
        Ok(())
    }
}
