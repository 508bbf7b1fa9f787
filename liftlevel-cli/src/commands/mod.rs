pub mod config;
pub mod reset;
pub mod serve;
pub mod status;

use std::path::PathBuf;

use crate::config::LiftLevelConfig;

/// Database path from the `--database` flag, falling back to the config
fn database_path(flag: Option<PathBuf>, config: &LiftLevelConfig) -> PathBuf {
    flag.unwrap_or_else(|| config.storage.database.clone())
}
