mod config;
pub mod document;

pub use config::{CalendarConfig, Config, LockingConfig, RevealConfig, UrgencyConfig};
pub use document::JourneyDocument;

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/journey[-dev]/` based on JOURNEY_ENV.
///
/// Set JOURNEY_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("JOURNEY_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("journey-dev")
    } else {
        base_dir.join("journey")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DirUnavailable(e.to_string()))?;
    Ok(dir)
}
