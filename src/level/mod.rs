//! Severity levels that gate which records reach the sinks.

use std::fmt;
use std::str::FromStr;

/// Derives `Ord` so the logger can compare a record's level against the configured threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Level {
    /// Verbose diagnostics; also the fallback for unrecognized level names.
    #[default]
    Debug = 0,
    /// Normal operational milestones such as a served request.
    Info = 1,
    /// Non-fatal anomalies that may need attention.
    Warn = 2,
    /// Failures that prevent an operation from completing.
    Error = 3,
    /// Errors that would panic in development builds; only logged here.
    DPanic = 4,
    /// Logged, then the calling thread panics.
    Panic = 5,
    /// Logged, then the process exits.
    Fatal = 6,
}

impl Level {
    /// Lowercase because config files and CLI args use lowercase level strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::DPanic => "dpanic",
            Self::Panic => "panic",
            Self::Fatal => "fatal",
        }
    }

    /// Encoders render levels capitalized (`WARN`, `DPANIC`).
    #[must_use]
    pub const fn as_capital_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::DPanic => "DPANIC",
            Self::Panic => "PANIC",
            Self::Fatal => "FATAL",
        }
    }

    /// Maps a configured level name to a severity, case-insensitively.
    ///
    /// Unrecognized names fall back to [`Level::Debug`] so a typo in the config
    /// never blocks startup. Note this is the most verbose level, not the safest.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or(Self::Debug)
    }

    /// All levels, lowest first.
    #[must_use]
    pub const fn all() -> [Self; 7] {
        [
            Self::Debug,
            Self::Info,
            Self::Warn,
            Self::Error,
            Self::DPanic,
            Self::Panic,
            Self::Fatal,
        ]
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by `FromStr` so strict callers (CLI, diagnostics) can reject unknown names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError(String);

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown log level: '{}'", self.0)
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            "dpanic" => Ok(Self::DPanic),
            "panic" => Ok(Self::Panic),
            "fatal" => Ok(Self::Fatal),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}
