//! Rotation thresholds separated from the file sink so retention can be run
//! (and tested) without an open log file.

use super::Backup;
use crate::logger::LoggingConfig;
use chrono::{DateTime, Utc};

const MEGABYTE: u64 = 1024 * 1024;
const SECONDS_PER_DAY: u64 = 86_400;

/// Zero in any limit disables that limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RotationPolicy {
    /// Rotate before a write would push the current file past this many bytes.
    pub max_size: u64,
    /// Keep at most this many backups.
    pub max_backups: usize,
    /// Remove backups rotated more than this many days ago.
    pub max_age_days: u64,
    /// Gzip backups that survive pruning.
    pub compress: bool,
}

impl RotationPolicy {
    /// Everything unlimited, nothing compressed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Translates the megabyte-based configuration into byte thresholds.
    #[must_use]
    pub fn from_config(config: &LoggingConfig) -> Self {
        Self {
            max_size: config.max_size_mb.saturating_mul(MEGABYTE),
            max_backups: usize::try_from(config.max_backups).unwrap_or(usize::MAX),
            max_age_days: config.max_age_days,
            compress: config.compress_backups,
        }
    }

    /// Tests and small deployments need thresholds below one megabyte.
    #[must_use]
    pub const fn max_size_bytes(mut self, bytes: u64) -> Self {
        self.max_size = bytes;
        self
    }

    #[must_use]
    pub const fn max_backups(mut self, count: usize) -> Self {
        self.max_backups = count;
        self
    }

    #[must_use]
    pub const fn max_age_days(mut self, days: u64) -> Self {
        self.max_age_days = days;
        self
    }

    #[must_use]
    pub const fn compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// True when a write of `incoming` bytes onto a file of `current` bytes must rotate first.
    /// An empty file never rotates, so an oversized record still lands whole in a fresh file.
    #[must_use]
    pub const fn needs_rotation(&self, current: u64, incoming: u64) -> bool {
        self.max_size > 0 && current > 0 && current.saturating_add(incoming) > self.max_size
    }

    #[must_use]
    pub fn is_expired(&self, backup: &Backup, now: DateTime<Utc>) -> bool {
        if self.max_age_days == 0 {
            return false;
        }
        let max_age = i64::try_from(self.max_age_days.saturating_mul(SECONDS_PER_DAY))
            .unwrap_or(i64::MAX);
        now.signed_duration_since(backup.timestamp).num_seconds() > max_age
    }
}
