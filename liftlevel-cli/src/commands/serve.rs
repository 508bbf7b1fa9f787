//! Serve command for running the tracking page and API

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use liftlevel_server::{AppState, LiftLevelServer, ServerConfig};
use tracing::info;

use crate::config::{ConfigLoader, LiftLevelConfig};

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Path of the SQLite workout database
    #[arg(long)]
    pub database: Option<PathBuf>,
}

/// Run the serve command
pub async fn run(args: ServeArgs) -> Result<()> {
    let config = ConfigLoader::load()?;
    let (server_config, database) = resolve(args, &config);

    info!("Using workout database at {}", database.display());
    let state = AppState::open(&database)
        .with_context(|| format!("Failed to open {}", database.display()))?
        .with_history_limit(config.page.history_limit);

    info!(
        "Starting liftlevel server on {}:{}",
        server_config.host, server_config.port
    );

    let server = LiftLevelServer::new(server_config, Arc::new(state));
    server.run().await.map_err(Into::into)
}

/// Apply command-line flags over the loaded configuration
fn resolve(args: ServeArgs, config: &LiftLevelConfig) -> (ServerConfig, PathBuf) {
    let server_config = ServerConfig::new(
        args.host.unwrap_or_else(|| config.server.host.clone()),
        args.port.unwrap_or(config.server.port),
    );
    let database = super::database_path(args.database, config);
    (server_config, database)
}
