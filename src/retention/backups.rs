//! Backup naming and discovery. The timestamp in the file name, not the file's
//! mtime, is the backup's age: copying or touching a backup must not make it
//! look younger.

use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Millisecond precision keeps back-to-back rotations apart.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H-%M-%S%.3f";
const TIMESTAMP_PATTERN: &str = r"\d{4}-\d{2}-\d{2}T\d{2}-\d{2}-\d{2}\.\d{3}";

/// One rotated file found next to the current log file.
#[derive(Debug, Clone)]
pub struct Backup {
    pub path: PathBuf,
    /// Moment of rotation, parsed back from the file name.
    pub timestamp: DateTime<Utc>,
    pub size: u64,
    /// `.gz` backups were compressed by a previous retention pass.
    pub compressed: bool,
}

impl Backup {
    /// Whole days since rotation, as shown by the CLI listing.
    #[must_use]
    pub fn age_days(&self, now: DateTime<Utc>) -> i64 {
        now.signed_duration_since(self.timestamp).num_days()
    }
}

/// Splits `usermanagement.log` into `("usermanagement", ".log")`; a name
/// without extension keeps an empty suffix.
fn split_name(current: &Path) -> (String, String) {
    let stem = current
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = current
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    (stem, ext)
}

/// `<dir>/<stem>-<timestamp><ext>` for a rotation at `at`.
#[must_use]
pub fn backup_path(current: &Path, at: DateTime<Utc>) -> PathBuf {
    let (stem, ext) = split_name(current);
    let name = format!("{stem}-{}{ext}", at.format(TIMESTAMP_FORMAT));
    current.with_file_name(name)
}

fn backup_regex(current: &Path) -> Result<Regex, crate::Error> {
    let (stem, ext) = split_name(current);
    let pattern = format!(
        r"^{}-({TIMESTAMP_PATTERN}){}(\.gz)?$",
        regex::escape(&stem),
        regex::escape(&ext)
    );
    Regex::new(&pattern).map_err(|e| crate::Error::Format(format!("backup pattern: {e}")))
}

/// Backups of `current`, newest first. A missing directory has no backups.
///
/// # Errors
/// Directory listing failures other than "not found".
pub fn list_backups(current: &Path) -> Result<Vec<Backup>, crate::Error> {
    let dir = match current.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let matcher = backup_regex(current)?;

    let entries = match fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut backups = Vec::new();
    for entry in entries {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        let Some(caps) = matcher.captures(name) else {
            continue;
        };
        let Ok(naive) = NaiveDateTime::parse_from_str(&caps[1], TIMESTAMP_FORMAT) else {
            continue;
        };
        let Ok(meta) = entry.metadata() else {
            continue;
        };
        if !meta.is_file() {
            continue;
        }

        backups.push(Backup {
            path: dir.join(name),
            timestamp: naive.and_utc(),
            size: meta.len(),
            compressed: caps.get(2).is_some(),
        });
    }

    backups.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    Ok(backups)
}
