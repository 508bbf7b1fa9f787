use super::types::{
    LiftLevelConfig, PageConfig, RawLiftLevelConfig, RawPageConfig, RawServerConfig,
    RawStorageConfig, ServerConfig, StorageConfig,
};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load merged configuration (user + project)
    pub fn load() -> Result<LiftLevelConfig> {
        Self::load_layers(&Self::user_config_path(), &Self::project_config_path())
    }

    /// Load and merge the two config layers from explicit paths
    fn load_layers(user_path: &Path, project_path: &Path) -> Result<LiftLevelConfig> {
        let mut raw = RawLiftLevelConfig::default();

        // Layer 1: User config
        if let Some(user_config) = Self::read_raw(user_path)? {
            raw = Self::merge_raw(raw, user_config);
        }

        // Layer 2: Project config
        if let Some(project_config) = Self::read_raw(project_path)? {
            raw = Self::merge_raw(raw, project_config);
        }

        Ok(Self::finalize(raw))
    }

    fn read_raw(path: &Path) -> Result<Option<RawLiftLevelConfig>> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let raw = toml::from_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        tracing::debug!("Loaded config layer from {}", path.display());
        Ok(Some(raw))
    }

    /// Get user config path (`<XDG config dir>/liftlevel/config.toml`)
    pub fn user_config_path() -> PathBuf {
        liftlevel_paths::config_dir().join("config.toml")
    }

    /// Get project config path
    /// Can be overridden with LIFTLEVEL_PROJECT_CONFIG_DIR env var (useful for isolated tests)
    pub fn project_config_path() -> PathBuf {
        if let Ok(dir) = std::env::var("LIFTLEVEL_PROJECT_CONFIG_DIR") {
            PathBuf::from(dir).join("config.toml")
        } else {
            PathBuf::from(".liftlevel/config.toml")
        }
    }

    /// Merge two raw configs (overlay values override base only if explicitly set)
    fn merge_raw(base: RawLiftLevelConfig, overlay: RawLiftLevelConfig) -> RawLiftLevelConfig {
        RawLiftLevelConfig {
            server: RawServerConfig {
                host: overlay.server.host.or(base.server.host),
                port: overlay.server.port.or(base.server.port),
            },
            storage: RawStorageConfig {
                database: overlay.storage.database.or(base.storage.database),
            },
            page: RawPageConfig {
                history_limit: overlay.page.history_limit.or(base.page.history_limit),
            },
        }
    }

    /// Convert raw config to final config with defaults applied
    fn finalize(raw: RawLiftLevelConfig) -> LiftLevelConfig {
        let server = ServerConfig::default();
        LiftLevelConfig {
            server: ServerConfig {
                host: raw.server.host.unwrap_or(server.host),
                port: raw.server.port.unwrap_or(server.port),
            },
            storage: StorageConfig {
                database: raw
                    .storage
                    .database
                    .unwrap_or_else(liftlevel_paths::default_database_path),
            },
            page: PageConfig {
                history_limit: raw
                    .page
                    .history_limit
                    .unwrap_or(PageConfig::default().history_limit),
            },
        }
    }
}
