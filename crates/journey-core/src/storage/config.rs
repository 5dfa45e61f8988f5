//! TOML-based engine configuration.
//!
//! Holds the tunables of the derivation engine:
//! - Calendar offset used to decide what "today" is
//! - Reveal window default and placeholder text
//! - Locking policy for units that have not begun
//! - Urgency tier boundaries
//!
//! Configuration is stored at `~/.config/journey/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;
use crate::reveal::{DEFAULT_PLACEHOLDER, DEFAULT_REVEAL_DAYS_BEFORE};
use crate::status::LockPolicy;
use crate::urgency::UrgencyThresholds;

/// Calendar configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// Offset from UTC, in minutes, of the participant's calendar
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

/// Reveal gate configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealConfig {
    #[serde(default = "default_reveal_days")]
    pub default_days_before: i64,
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
}

/// Locking configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LockingConfig {
    #[serde(default)]
    pub lock_future_units: bool,
}

/// Urgency tier configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrgencyConfig {
    #[serde(default = "default_soon_max_days")]
    pub soon_max_days: i64,
    #[serde(default = "default_week_max_days")]
    pub week_max_days: i64,
}

/// Engine configuration.
///
/// Serialized to/from TOML at `~/.config/journey/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub reveal: RevealConfig,
    #[serde(default)]
    pub locking: LockingConfig,
    #[serde(default)]
    pub urgency: UrgencyConfig,
}

fn default_reveal_days() -> i64 {
    DEFAULT_REVEAL_DAYS_BEFORE
}
fn default_placeholder() -> String {
    DEFAULT_PLACEHOLDER.into()
}
fn default_soon_max_days() -> i64 {
    3
}
fn default_week_max_days() -> i64 {
    7
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: 0,
        }
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            default_days_before: default_reveal_days(),
            placeholder: default_placeholder(),
        }
    }
}

impl Default for UrgencyConfig {
    fn default() -> Self {
        Self {
            soon_max_days: default_soon_max_days(),
            week_max_days: default_week_max_days(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value
                            .parse::<i64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as integer")))?;
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::Object(_) => return Err(unknown()),
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Default on-disk location.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if the file is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            Ok(cfg)
        }
    }

    /// Load from an explicit file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let load_failed = |message: String| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = std::fs::read_to_string(path).map_err(|e| load_failed(e.to_string()))?;
        toml::from_str(&content).map_err(|e| load_failed(e.to_string()))
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit file.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Update a value in memory by dot-separated key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value has the wrong type.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let mut json = serde_json::to_value(&*self).map_err(|e| invalid(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| invalid(e.to_string()))?;
        if !updated.raw_urgency_thresholds().is_valid() {
            return Err(invalid(format!(
                "need soon_max_days >= {} and week_max_days > soon_max_days",
                UrgencyThresholds::MIN_SOON_MAX_DAYS
            )));
        }
        *self = updated;
        Ok(())
    }

    /// Update a value and persist to the default location.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.set_value(key, value)?;
        self.save()
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!("falling back to default config: {e}");
                Self::default()
            }
        }
    }

    pub fn lock_policy(&self) -> LockPolicy {
        LockPolicy {
            lock_future_units: self.locking.lock_future_units,
        }
    }

    /// Urgency tier boundaries; hand-edited files with unusable values are
    /// clamped to the nearest valid setting.
    pub fn urgency_thresholds(&self) -> UrgencyThresholds {
        self.raw_urgency_thresholds().clamped()
    }

    fn raw_urgency_thresholds(&self) -> UrgencyThresholds {
        UrgencyThresholds {
            soon_max_days: self.urgency.soon_max_days,
            week_max_days: self.urgency.week_max_days,
        }
    }
}
