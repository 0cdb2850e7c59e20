//! TOML-based application configuration.
//!
//! Stores user preferences only: alert windows and beep parameters, the
//! adherence window length, the report format, and the reward style.
//! Session data (medicines, dose logs) is deliberately never persisted.
//!
//! Configuration is stored at `~/.config/medtimer/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/medtimer[-dev]/` based on MEDTIMER_ENV.
///
/// Set MEDTIMER_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the config directory cannot be created.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("MEDTIMER_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("medtimer-dev")
    } else {
        base_dir.join("medtimer")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DirUnavailable(e.to_string()))?;
    Ok(dir)
}

/// Alert configuration: the due-soon window and the beep tone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertsConfig {
    #[serde(default = "default_due_soon_window_min")]
    pub due_soon_window_min: i64,
    #[serde(default = "default_true")]
    pub beep_enabled: bool,
    #[serde(default = "default_beep_freq_hz")]
    pub beep_freq_hz: f64,
    #[serde(default = "default_beep_secs")]
    pub beep_secs: f64,
    #[serde(default = "default_beep_volume")]
    pub beep_volume: f64,
}

/// Adherence window configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdherenceConfig {
    #[serde(default = "default_window_days")]
    pub window_days: u32,
}

/// Report export configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// "pdf" or "csv". Resolved once at startup.
    #[serde(default = "default_report_format")]
    pub format: String,
}

/// Reward banner configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardsConfig {
    /// "emoji" or "plain". Resolved once at startup.
    #[serde(default = "default_reward_style")]
    pub style: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/medtimer/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub alerts: AlertsConfig,
    #[serde(default)]
    pub adherence: AdherenceConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub rewards: RewardsConfig,
}

// Default functions
fn default_due_soon_window_min() -> i64 {
    5
}
fn default_beep_freq_hz() -> f64 {
    880.0
}
fn default_beep_secs() -> f64 {
    0.6
}
fn default_beep_volume() -> f64 {
    0.5
}
fn default_window_days() -> u32 {
    7
}
fn default_report_format() -> String {
    "csv".into()
}
fn default_reward_style() -> String {
    "emoji".into()
}
fn default_true() -> bool {
    true
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            due_soon_window_min: default_due_soon_window_min(),
            beep_enabled: true,
            beep_freq_hz: default_beep_freq_hz(),
            beep_secs: default_beep_secs(),
            beep_volume: default_beep_volume(),
        }
    }
}

impl Default for AdherenceConfig {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: default_report_format(),
        }
    }
}

impl Default for RewardsConfig {
    fn default() -> Self {
        Self {
            style: default_reward_style(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            alerts: AlertsConfig::default(),
            adherence: AdherenceConfig::default(),
            report: ReportConfig::default(),
            rewards: RewardsConfig::default(),
        }
    }
}

impl AppConfig {
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
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<i64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| {
                                    invalid(format!("cannot parse '{value}' as number"))
                                })?
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as number")));
                        }
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        }

        Err(ConfigError::UnknownKey(key.to_string()))
    }

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk. A missing file yields the defaults without writing
    /// anything; a present but malformed file is an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))
            }
            Err(_) => Ok(Self::default()),
        }
    }

    /// Load from disk, returning defaults on any error. Never fails and
    /// never writes.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key (in memory only; call
    /// `save` to persist).
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be
    /// parsed as the existing field's type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }
}
