//! Thresholds and timings for the input state machine, loadable from TOML.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

const CONFIG_FILE: &str = "config.toml";

/// Errors that can occur when loading, saving or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    ReadError(#[source] std::io::Error),

    #[error("failed to write config: {0}")]
    WriteError(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    ParseError(#[source] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    SerializeError(#[source] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),

    #[error("no platform config directory available")]
    NoConfigDir,
}

/// How a sample is compared against its threshold.
#[derive(Deserialize, Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdPolicy {
    /// Active when `metric >= threshold`.
    #[default]
    Inclusive,
    /// Active when `metric > threshold`.
    Exclusive,
}

impl ThresholdPolicy {
    pub fn is_active(self, metric: f32, threshold: f32) -> bool {
        match self {
            ThresholdPolicy::Inclusive => metric >= threshold,
            ThresholdPolicy::Exclusive => metric > threshold,
        }
    }
}

/// Configuration for [`InputStateMachine`](crate::InputStateMachine).
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Minimum value for a button (or analog trigger) to count as pressed.
    pub button_threshold: f32,
    /// Minimum absolute value for an axis to count as deflected.
    pub axis_threshold: f32,
    /// Hold time before `long_press` fires.
    pub longpress_threshold_ms: u64,
    /// Hold time before the first `repeat` fires.
    pub repeat_threshold_ms: u64,
    /// Spacing between subsequent `repeat` events.
    pub repeat_rate_ms: u64,
    pub threshold_policy: ThresholdPolicy,
    /// Tick period used by the polling binary.
    pub poll_interval_ms: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            button_threshold: 0.1,
            axis_threshold: 0.1,
            longpress_threshold_ms: 300,
            repeat_threshold_ms: 300,
            repeat_rate_ms: 100,
            threshold_policy: ThresholdPolicy::Inclusive,
            poll_interval_ms: 16,
        }
    }
}

impl InputConfig {
    pub fn longpress_threshold(&self) -> Duration {
        Duration::from_millis(self.longpress_threshold_ms)
    }

    pub fn repeat_threshold(&self) -> Duration {
        Duration::from_millis(self.repeat_threshold_ms)
    }

    pub fn repeat_rate(&self) -> Duration {
        Duration::from_millis(self.repeat_rate_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// `<platform config dir>/padwatch/config.toml`.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|dir| dir.join("padwatch").join(CONFIG_FILE))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Read, parse and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: InputConfig = toml::from_str(&contents).map_err(ConfigError::ParseError)?;
        config.validate()?;
        info!("Loaded input config from {}", path.display());
        Ok(config)
    }

    /// Load `config.toml` from `config_dir`, falling back to defaults if the
    /// file does not exist. A file that exists but fails to parse is an error.
    pub fn load_or_default(config_dir: &Path) -> Result<Self, ConfigError> {
        let path = config_dir.join(CONFIG_FILE);
        if path.exists() {
            Self::load(&path)
        } else {
            debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self).map_err(ConfigError::SerializeError)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(ConfigError::WriteError)?;
        }
        fs::write(path, contents).map_err(ConfigError::WriteError)?;
        info!("Saved input config to {}", path.display());
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("button_threshold", self.button_threshold),
            ("axis_threshold", self.axis_threshold),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be within 0.0..=1.0, got {value}"
                )));
            }
        }
        Ok(())
    }
}
