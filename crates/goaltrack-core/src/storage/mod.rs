mod config;

pub use config::{
    Config, OracleConfig, OracleProvider, SchedulingConfig, StoreConfig, StoreProvider,
    MAX_ACTIVITY_MINUTES, MIN_ACTIVITY_MINUTES,
};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the data directory, creating it if needed.
///
/// `$GOALTRACK_CONFIG_DIR` wins when set. Otherwise `~/.config/goaltrack`,
/// or `~/.config/goaltrack-dev` when GOALTRACK_ENV=dev.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var("GOALTRACK_CONFIG_DIR") {
        Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("GOALTRACK_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("goaltrack-dev")
            } else {
                base_dir.join("goaltrack")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DirUnavailable(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
