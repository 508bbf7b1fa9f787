use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration as stored in TOML files (with optional fields for merging)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawLiftLevelConfig {
    #[serde(default)]
    pub server: RawServerConfig,

    #[serde(default)]
    pub storage: RawStorageConfig,

    #[serde(default)]
    pub page: RawPageConfig,
}

/// Server config as stored in TOML (optional fields for proper merging)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawServerConfig {
    /// Host address to bind to
    pub host: Option<String>,

    /// Port for the liftlevel server
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawStorageConfig {
    /// Path of the SQLite workout database
    pub database: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawPageConfig {
    /// Recent workouts listed on the tracking page
    pub history_limit: Option<u32>,
}

/// Final configuration with defaults applied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LiftLevelConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub page: PageConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,

    /// Port for the liftlevel server
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path of the SQLite workout database
    pub database: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database: liftlevel_paths::default_database_path(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    /// Recent workouts listed on the tracking page
    pub history_limit: u32,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            history_limit: liftlevel_server::DEFAULT_HISTORY_LIMIT,
        }
    }
}

/// Default host for the liftlevel server
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default port for the liftlevel server
pub const DEFAULT_PORT: u16 = 5000;
