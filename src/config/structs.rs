//! Configuration struct definitions.

use serde::Deserialize;

/// One channel's table. Every field is optional so a partial table only
/// overrides what it names; the rest comes from the channel defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChannelSettings {
    /// Path of the current log file; `~` is expanded.
    pub file: Option<String>,
    /// `json` or `plain`.
    pub format: Option<String>,
    /// Threshold name, `debug` through `fatal`.
    pub level: Option<String>,
    pub max_size_mb: Option<u64>,
    pub max_backups: Option<u64>,
    pub max_age_days: Option<u64>,
    /// Attach the call site to every record.
    pub caller: Option<bool>,
    /// Gzip rotated files.
    pub compress: Option<bool>,
}
