//! Fluent accumulator for [`LoggingConfig`]. Setters borrow the builder
//! mutably and hand it back, so calls chain in any order and the builder
//! survives `build` for reuse.

use super::{LoggerKind, LoggingConfig};
use crate::encoder::Format;
use crate::level::Level;

#[derive(Debug, Clone, Default)]
pub struct LoggerBuilder {
    config: LoggingConfig,
}

impl LoggerBuilder {
    /// Starts from the defaults table in [`LoggingConfig`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Channel selector as it appears in configuration; checked at construction.
    pub fn logger_type(&mut self, logger_type: impl Into<String>) -> &mut Self {
        self.config.logger_type = logger_type.into();
        self
    }

    pub fn kind(&mut self, kind: LoggerKind) -> &mut Self {
        self.config.logger_type = kind.as_str().to_string();
        self
    }

    pub fn file_path(&mut self, path: impl Into<String>) -> &mut Self {
        self.config.file_path = path.into();
        self
    }

    /// `json` selects JSON; anything else is plain text.
    pub fn format(&mut self, format: &str) -> &mut Self {
        self.config.format = Format::from_name(format);
        self
    }

    pub fn encoding(&mut self, format: Format) -> &mut Self {
        self.config.format = format;
        self
    }

    /// Unknown names fall back to `debug`.
    pub fn level(&mut self, level: &str) -> &mut Self {
        self.config.level = Level::from_name(level);
        self
    }

    pub fn min_level(&mut self, level: Level) -> &mut Self {
        self.config.level = level;
        self
    }

    /// Size in megabytes that triggers rotation; zero disables rotation.
    pub fn max_size_mb(&mut self, megabytes: u64) -> &mut Self {
        self.config.max_size_mb = megabytes;
        self
    }

    /// Rotated files to keep; zero keeps all of them.
    pub fn max_backups(&mut self, count: u64) -> &mut Self {
        self.config.max_backups = count;
        self
    }

    /// Days a rotated file is kept; zero keeps them regardless of age.
    pub fn max_age_days(&mut self, days: u64) -> &mut Self {
        self.config.max_age_days = days;
        self
    }

    /// Attach `dir/file.rs:line` of the logging call to every record.
    pub fn capture_caller(&mut self, capture: bool) -> &mut Self {
        self.config.capture_caller = capture;
        self
    }

    /// Gzip rotated files that survive retention.
    pub fn compress_backups(&mut self, compress: bool) -> &mut Self {
        self.config.compress_backups = compress;
        self
    }

    /// Snapshots the current values. Performs no I/O and no validation.
    #[must_use]
    pub fn build(&self) -> LoggingConfig {
        self.config.clone()
    }
}
