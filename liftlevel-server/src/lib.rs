//! liftlevel-server - HTTP server for the liftlevel workout tracker
//!
//! This crate owns the [`AppState`] (a tracker over the SQLite ledger) and
//! serves the tracking page, its embedded assets and the JSON API.

mod error;
pub mod http;
mod state;

use std::sync::Arc;

use tokio::net::TcpListener;

pub use error::ServerError;
pub use http::create_router;
pub use state::{AppState, DEFAULT_HISTORY_LIMIT, MAX_HISTORY_LIMIT};

/// The main liftlevel server
pub struct LiftLevelServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl LiftLevelServer {
    /// Create a server over existing state
    pub fn new(config: ServerConfig, state: Arc<AppState>) -> Self {
        Self { config, state }
    }

    /// Get the server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get the shared application state
    pub fn state(&self) -> Arc<AppState> {
        Arc::clone(&self.state)
    }

    /// Run the server, binding to the configured address
    pub async fn run(self) -> Result<(), ServerError> {
        let addr = self.config.addr();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| ServerError::Bind {
                addr: addr.clone(),
                source: e,
            })?;

        tracing::info!("liftlevel server listening on {}", addr);

        self.run_with_listener(listener).await
    }

    /// Serve on an already bound listener
    pub async fn run_with_listener(self, listener: TcpListener) -> Result<(), ServerError> {
        let router = create_router(self.state);
        axum::serve(listener, router)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?;

        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

impl ServerConfig {
    /// Create a new ServerConfig with the specified host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Returns the socket address string (e.g., "127.0.0.1:5000")
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
