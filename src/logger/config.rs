//! The frozen configuration of one logger and the selector naming its channel.

use crate::encoder::Format;
use crate::level::Level;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// The two channels a process owns. Anything else is rejected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoggerKind {
    /// Application lifecycle: startup banner, database, shutdown.
    System,
    /// One record per served request, plus recovered panics.
    Access,
}

impl LoggerKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Access => "access",
        }
    }

    #[must_use]
    pub const fn all() -> [Self; 2] {
        [Self::System, Self::Access]
    }
}

impl fmt::Display for LoggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoggerKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "system" => Ok(Self::System),
            "access" => Ok(Self::Access),
            _ => Err(crate::Error::LoggerType(s.to_string())),
        }
    }
}

/// Immutable snapshot produced by `LoggerBuilder::build`.
///
/// Nothing here is validated until the registry constructs a logger from it,
/// so one builder can produce several differently configured snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub(crate) logger_type: String,
    pub(crate) file_path: String,
    pub(crate) format: Format,
    pub(crate) level: Level,
    pub(crate) max_size_mb: u64,
    pub(crate) max_backups: u64,
    pub(crate) max_age_days: u64,
    pub(crate) capture_caller: bool,
    pub(crate) compress_backups: bool,
}

impl LoggingConfig {
    pub const DEFAULT_LOGGER_TYPE: &'static str = "system";
    pub const DEFAULT_FILE_PATH: &'static str = "usermanagement.log";
    pub const DEFAULT_FORMAT: Format = Format::Plain;
    pub const DEFAULT_LEVEL: Level = Level::Debug;
    pub const DEFAULT_MAX_SIZE_MB: u64 = 5;
    pub const DEFAULT_MAX_BACKUPS: u64 = 10;
    pub const DEFAULT_MAX_AGE_DAYS: u64 = 15;
    pub const DEFAULT_CAPTURE_CALLER: bool = false;
    pub const DEFAULT_COMPRESS_BACKUPS: bool = false;

    #[must_use]
    pub fn logger_type(&self) -> &str {
        &self.logger_type
    }

    #[must_use]
    pub fn file_path(&self) -> &Path {
        Path::new(&self.file_path)
    }

    #[must_use]
    pub const fn format(&self) -> Format {
        self.format
    }

    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }

    #[must_use]
    pub const fn max_size_mb(&self) -> u64 {
        self.max_size_mb
    }

    #[must_use]
    pub const fn max_backups(&self) -> u64 {
        self.max_backups
    }

    #[must_use]
    pub const fn max_age_days(&self) -> u64 {
        self.max_age_days
    }

    #[must_use]
    pub const fn capture_caller(&self) -> bool {
        self.capture_caller
    }

    #[must_use]
    pub const fn compress_backups(&self) -> bool {
        self.compress_backups
    }

    /// Parses the channel selector.
    ///
    /// # Errors
    /// `LoggerType` for anything but `system` or `access`.
    pub fn kind(&self) -> Result<LoggerKind, crate::Error> {
        self.logger_type.parse()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            logger_type: Self::DEFAULT_LOGGER_TYPE.to_string(),
            file_path: Self::DEFAULT_FILE_PATH.to_string(),
            format: Self::DEFAULT_FORMAT,
            level: Self::DEFAULT_LEVEL,
            max_size_mb: Self::DEFAULT_MAX_SIZE_MB,
            max_backups: Self::DEFAULT_MAX_BACKUPS,
            max_age_days: Self::DEFAULT_MAX_AGE_DAYS,
            capture_caller: Self::DEFAULT_CAPTURE_CALLER,
            compress_backups: Self::DEFAULT_COMPRESS_BACKUPS,
        }
    }
}
