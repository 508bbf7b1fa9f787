//! XDG Base Directory paths for liftlevel.
//!
//! The tracker keeps its config and its SQLite database under XDG paths on
//! every platform, the same way CLI tools like gh or docker do.

use std::path::PathBuf;

/// File name of the workout database inside [`data_dir`].
pub const DATABASE_FILE: &str = "liftlevel.db";

/// Get the liftlevel config directory.
///
/// Returns `$XDG_CONFIG_HOME/liftlevel` if set, otherwise `~/.config/liftlevel`.
///
/// # Examples
///
/// ```
/// use liftlevel_paths::config_dir;
///
/// let config = config_dir();
/// let user_config = config.join("config.toml");
/// ```
pub fn config_dir() -> PathBuf {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg_config).join("liftlevel")
    } else if let Some(home) = dirs::home_dir() {
        home.join(".config/liftlevel")
    } else {
        PathBuf::from(".config/liftlevel")
    }
}

/// Get the liftlevel data directory.
///
/// Returns `$XDG_DATA_HOME/liftlevel` if set, otherwise `~/.local/share/liftlevel`.
/// The workout database lives here unless the config points elsewhere.
pub fn data_dir() -> PathBuf {
    if let Ok(xdg_data) = std::env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg_data).join("liftlevel")
    } else if let Some(home) = dirs::home_dir() {
        home.join(".local/share/liftlevel")
    } else {
        PathBuf::from(".local/share/liftlevel")
    }
}

/// Default location of the workout database.
pub fn default_database_path() -> PathBuf {
    data_dir().join(DATABASE_FILE)
}
