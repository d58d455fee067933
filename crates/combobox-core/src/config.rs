//! Configuration types.
//!
//! Every field has a default, so an empty or partial TOML file is valid.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;

/// Behaviour and text settings for a select widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectConfig {
    /// Delay between a commit/blur and the popup disappearing.
    pub close_delay_ms: u64,

    /// Quiet period before a resize recomputes popup placement.
    pub resize_debounce_ms: u64,

    /// Gap between the input and the popup, in pixels.
    pub popup_gap: f32,

    /// Upper bound for resolving an asynchronous option source.
    pub source_timeout_ms: u64,

    /// Text shown when no option matches the search.
    pub no_results_text: String,

    /// Placeholder shown in an empty input.
    pub placeholder: String,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            close_delay_ms: 150,
            resize_debounce_ms: 200,
            popup_gap: 4.0,
            source_timeout_ms: 5_000,
            no_results_text: "No results".to_string(),
            placeholder: String::new(),
        }
    }
}

impl SelectConfig {
    /// Parse a config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load a config from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_toml_str(&text)
    }

    pub fn close_delay(&self) -> Duration {
        Duration::from_millis(self.close_delay_ms)
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    pub fn source_timeout(&self) -> Duration {
        Duration::from_millis(self.source_timeout_ms)
    }
}

/// Get the config directory path.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("combobox"))
}

/// Get the path to config.toml.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    config_dir()
        .map(|dir| dir.join("config.toml"))
        .ok_or(ConfigError::NoConfigDir)
}
