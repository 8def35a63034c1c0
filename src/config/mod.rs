//! Configuration loaded from `~/.config/wlctrl/config.toml`.

mod types;
mod validation;

pub use types::{AppConfig, ListFormat};
pub use validation::{ValidationWarning, validate_config};

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::error::ConfigError;

/// Global config instance
static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("wlctrl"))
}

/// Path of the config file.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    config_dir()
        .map(|dir| dir.join("config.toml"))
        .ok_or(ConfigError::NoDirFound)
}

/// Parse a config file.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFailed)?;
    toml::from_str(&content).map_err(ConfigError::ParseFailed)
}

/// Load application config from ~/.config/wlctrl/config.toml
/// Returns None if the config file doesn't exist
/// Logs warning and returns None if reading or parsing fails
pub fn load_app_config() -> Option<AppConfig> {
    let config_path = match config_path() {
        Ok(path) => path,
        Err(e) => {
            tracing::debug!("{}, using defaults", e);
            return None;
        }
    };

    if !config_path.exists() {
        tracing::debug!("Config file not found at {:?}, using defaults", config_path);
        return None;
    }

    match load_config_from(&config_path) {
        Ok(config) => {
            tracing::info!("Loaded app config from {:?}", config_path);
            for warning in validate_config(&config) {
                tracing::warn!("Config {}: {}", warning.field, warning.message);
            }
            Some(config)
        }
        Err(e) => {
            tracing::warn!("{} ({:?}), using defaults", e, config_path);
            None
        }
    }
}

/// Get the global app config (cached)
pub fn config() -> &'static AppConfig {
    CONFIG.get_or_init(|| load_app_config().unwrap_or_default())
}
