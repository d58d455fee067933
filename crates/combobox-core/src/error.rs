//! Error types for the combobox.

use std::time::Duration;
use thiserror::Error;

/// Option source errors - never surfaced to the UI.
///
/// The widget logs these and continues with an empty option list.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The provider reported a failure.
    #[error("Option source failed: {0}")]
    Failed(String),

    /// The provider did not settle in time.
    #[error("Option source timeout after {duration:?}")]
    Timeout { duration: Duration },

    /// The provider returned data that could not be decoded.
    #[error("Option source parse error: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for SourceError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No config directory found.
    #[error("Config directory not found")]
    NoConfigDir,

    /// IO error.
    #[error("IO error: {0}")]
    Io(String),

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(String),
}
