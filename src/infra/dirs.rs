//! Platform-specific directory management
//!
//! Locates the user-level config directory holding the global `config.toml`.
//! Follows the XDG Base Directory Specification on Linux and standard
//! locations on macOS.
//!
//! `TZDB_CONFIG_DIR` overrides the default location.

use std::env;
use std::path::PathBuf;

use crate::config::defaults::GLOBAL_CONFIG_FILE;

/// Environment variable overriding the config directory
pub const ENV_CONFIG_DIR: &str = "TZDB_CONFIG_DIR";

/// Application name used in directory paths
const APP_NAME: &str = "tzdb";

/// Platform-specific directory provider
#[derive(Debug, Clone)]
pub struct TzdbDirs {
    config_dir: PathBuf,
}

impl TzdbDirs {
    /// Resolve directories from the environment, then platform defaults
    #[must_use]
    pub fn new() -> Self {
        let config_dir = env::var_os(ENV_CONFIG_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(Self::platform_config_dir);
        Self { config_dir }
    }

    /// Use an explicit config directory
    #[must_use]
    pub fn with_config_dir(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    /// The config directory
    ///
    /// - Linux: `$XDG_CONFIG_HOME/tzdb` or `~/.config/tzdb`
    /// - macOS: `~/Library/Application Support/tzdb`
    #[must_use]
    pub fn config_dir(&self) -> PathBuf {
        self.config_dir.clone()
    }

    /// Path of the global `config.toml`
    #[must_use]
    pub fn global_config_path(&self) -> PathBuf {
        self.config_dir.join(GLOBAL_CONFIG_FILE)
    }

    fn platform_config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|p| p.join(APP_NAME))
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .map(|h| h.join(".config").join(APP_NAME))
                    .unwrap_or_else(|| PathBuf::from(".").join(".config").join(APP_NAME))
            })
    }
}

impl Default for TzdbDirs {
    fn default() -> Self {
        Self::new()
    }
}
