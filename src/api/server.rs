//! HTTP Server
//!
//! Binds the listener, mounts the API under `/api` and serves until Ctrl-C.

use std::net::SocketAddr;

use axum::http::HeaderValue;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, instrument, warn};

use super::routes::routes;
use crate::context::SharedContext;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address.
    pub bind_addr: SocketAddr,
    /// Allowed CORS origins. `*` allows any origin.
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8001)),
            cors_origins: vec!["*".to_string()],
        }
    }
}

impl ServerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Result<Self, ApiServerError> {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("BIND_ADDR") {
            config.bind_addr = addr.parse().map_err(|_| {
                ApiServerError::InvalidConfig(format!("BIND_ADDR is not an address: {addr}"))
            })?;
        }

        if let Ok(origins) = std::env::var("CORS_ORIGINS") {
            config.cors_origins = origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        Ok(config)
    }

    fn cors_layer(&self) -> CorsLayer {
        let base = CorsLayer::new().allow_methods(Any).allow_headers(Any);

        if self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o == "*") {
            return base.allow_origin(Any);
        }

        let origins: Vec<HeaderValue> = self
            .cors_origins
            .iter()
            .filter_map(|o| match HeaderValue::from_str(o) {
                Ok(v) => Some(v),
                Err(_) => {
                    warn!("Ignoring invalid CORS origin {:?}", o);
                    None
                }
            })
            .collect();
        base.allow_origin(AllowOrigin::list(origins))
    }
}

/// Server errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiServerError {
    /// Failed to bind or serve.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be parsed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Build the full application router.
pub fn build_router(ctx: SharedContext, config: &ServerConfig) -> Router {
    Router::new()
        .nest("/api", routes())
        .layer(config.cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

/// The API server.
pub struct ApiServer {
    config: ServerConfig,
    ctx: SharedContext,
}

impl ApiServer {
    /// Create a new server.
    pub fn new(config: ServerConfig, ctx: SharedContext) -> Self {
        Self { config, ctx }
    }

    /// Run the server.
    #[instrument(skip(self))]
    pub async fn run(&self) -> Result<(), ApiServerError> {
        let app = build_router(self.ctx.clone(), &self.config);
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        info!("API server listening on {}", self.config.bind_addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("API server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        warn!("Could not install Ctrl-C handler; running until killed");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

// =============================================================================
// TESTS
// =============================================================================
