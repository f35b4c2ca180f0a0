//! Without retention, every rotation leaves one more backup behind until the
//! disk fills. This module finds the backups of one log file and enforces the
//! count and age limits on them, optionally gzipping the survivors.

mod backups;
mod compress;
mod policy;
mod result;

pub use backups::{Backup, backup_path, list_backups};
pub use policy::RotationPolicy;
pub use result::PruneResult;

use crate::internal;
use chrono::{DateTime, Utc};
use compress::compress_file;
use std::fs;
use std::path::Path;

/// Raw byte counts are unreadable in terminal output.
#[must_use]
pub fn format_size(bytes: u64) -> String {
    #[allow(clippy::cast_precision_loss)]
    let bytes_f = bytes as f64;

    if bytes >= 1024 * 1024 * 1024 {
        format!("{:.2} GB", bytes_f / (1024.0 * 1024.0 * 1024.0))
    } else if bytes >= 1024 * 1024 {
        format!("{:.2} MB", bytes_f / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.2} KB", bytes_f / 1024.0)
    } else {
        format!("{bytes} B")
    }
}

/// Applies the policy to the backups of `current`. The count and age limits are
/// independent: a backup goes when either one condemns it.
///
/// Individual removal and compression failures are collected in the result
/// rather than aborting the pass.
///
/// # Errors
/// Only when the backup directory itself cannot be listed.
pub fn prune(
    current: &Path,
    policy: &RotationPolicy,
    now: DateTime<Utc>,
) -> Result<PruneResult, crate::Error> {
    let mut result = PruneResult::default();

    // Newest first, so the index doubles as "how many newer backups exist"
    let backups = list_backups(current)?;
    internal::debug(
        "RETENTION",
        &format!("{} backups of {}", backups.len(), current.display()),
    );

    let mut kept = Vec::with_capacity(backups.len());
    for (index, backup) in backups.into_iter().enumerate() {
        let over_count = policy.max_backups > 0 && index >= policy.max_backups;
        let too_old = policy.is_expired(&backup, now);

        if over_count || too_old {
            match fs::remove_file(&backup.path) {
                Ok(()) => {
                    internal::debug(
                        "RETENTION",
                        &format!("Removed backup {}", backup.path.display()),
                    );
                    result.removed.push(backup.path);
                }
                Err(e) => result.failed.push((backup.path, e.to_string())),
            }
        } else {
            kept.push(backup);
        }
    }

    if policy.compress {
        for backup in kept.iter().filter(|b| !b.compressed) {
            match compress_file(&backup.path) {
                Ok(gz_path) => result.compressed.push(gz_path),
                Err(e) => {
                    internal::warn(
                        "RETENTION",
                        &format!("Failed to compress {}: {e}", backup.path.display()),
                    );
                    result.failed.push((backup.path.clone(), e.to_string()));
                }
            }
        }
    }

    Ok(result)
}
