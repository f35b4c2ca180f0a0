//! Unified error type for all logging subsystem operations.

use crate::config::ConfigError;
use std::path::PathBuf;

/// Error type for registry construction, sinks and encoders.
#[derive(Debug)]
pub enum Error {
    /// Malformed or missing configuration value.
    Config(ConfigError),
    /// Logger type selector is neither `system` nor `access`.
    LoggerType(String),
    /// The file sink could not write or rotate.
    SinkWrite {
        path: PathBuf,
        source: std::io::Error,
    },
    /// I/O error outside the file sink (stdout, retention).
    Io(std::io::Error),
    /// Record could not be serialized.
    Format(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config error: {e}"),
            Self::LoggerType(t) => write!(f, "logger type '{t}' not recognized"),
            Self::SinkWrite { path, source } => {
                write!(f, "write to {} failed: {source}", path.display())
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Format(s) => write!(f, "format error: {s}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::SinkWrite { source, .. } => Some(source),
            Self::Io(e) => Some(e),
            Self::LoggerType(_) | Self::Format(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Format(e.to_string())
    }
}
