//! Tests for backup discovery, pruning and compression.

use chrono::{TimeDelta, Utc};
use flate2::read::GzDecoder;
use std::fs;
use std::io::Read;
use std::path::Path;
use tempfile::tempdir;
use usermgmt_log::RotationPolicy;
use usermgmt_log::retention::{backup_path, format_size, list_backups, prune};

fn make_backup(current: &Path, days_ago: i64, content: &str) -> std::path::PathBuf {
    let at = Utc::now() - TimeDelta::days(days_ago);
    let path = backup_path(current, at);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn missing_directory_has_no_backups() {
    let dir = tempdir().unwrap();
    let current = dir.path().join("nope").join("app.log");
    assert!(list_backups(&current).unwrap().is_empty());
}

#[test]
fn lists_newest_first_and_ignores_strangers() {
    let dir = tempdir().unwrap();
    let current = dir.path().join("app.log");
    fs::write(&current, "live").unwrap();
    let old = make_backup(&current, 3, "old");
    let new = make_backup(&current, 1, "new");
    fs::write(dir.path().join("notes.txt"), "x").unwrap();
    fs::write(dir.path().join("other-2026-01-01T00-00-00.000.log"), "x").unwrap();

    let backups = list_backups(&current).unwrap();
    let paths: Vec<_> = backups.iter().map(|b| b.path.clone()).collect();
    assert_eq!(paths, vec![new, old]);
    assert!(backups.iter().all(|b| !b.compressed));
}

#[test]
fn prune_keeps_newest_within_count() {
    let dir = tempdir().unwrap();
    let current = dir.path().join("app.log");
    for days in 1..=5 {
        make_backup(&current, days, "x");
    }

    let policy = RotationPolicy::new().max_backups(2);
    let result = prune(&current, &policy, Utc::now()).unwrap();

    assert_eq!(result.removed.len(), 3);
    let left = list_backups(&current).unwrap();
    assert_eq!(left.len(), 2);
    assert!(left.iter().all(|b| b.age_days(Utc::now()) <= 2));
}

#[test]
fn prune_removes_expired_regardless_of_count() {
    let dir = tempdir().unwrap();
    let current = dir.path().join("app.log");
    let fresh = make_backup(&current, 1, "fresh");
    let stale = make_backup(&current, 30, "stale");

    let policy = RotationPolicy::new().max_backups(10).max_age_days(15);
    let result = prune(&current, &policy, Utc::now()).unwrap();

    assert_eq!(result.removed, vec![stale.clone()]);
    assert!(fresh.exists());
    assert!(!stale.exists());
}

#[test]
fn zero_limits_keep_everything() {
    let dir = tempdir().unwrap();
    let current = dir.path().join("app.log");
    for days in [1, 100, 1000] {
        make_backup(&current, days, "x");
    }

    let result = prune(&current, &RotationPolicy::new(), Utc::now()).unwrap();

    assert!(result.is_empty());
    assert_eq!(list_backups(&current).unwrap().len(), 3);
}

#[test]
fn compress_replaces_backups_with_gzip() {
    let dir = tempdir().unwrap();
    let current = dir.path().join("app.log");
    let plain = make_backup(&current, 1, "line one\nline two\n");

    let policy = RotationPolicy::new().compress(true);
    let result = prune(&current, &policy, Utc::now()).unwrap();

    assert_eq!(result.compressed.len(), 1);
    assert!(!plain.exists());

    let backups = list_backups(&current).unwrap();
    assert_eq!(backups.len(), 1);
    assert!(backups[0].compressed);

    let mut decoded = String::new();
    GzDecoder::new(fs::File::open(&backups[0].path).unwrap())
        .read_to_string(&mut decoded)
        .unwrap();
    assert_eq!(decoded, "line one\nline two\n");

    // Already compressed backups are left alone on the next pass
    let again = prune(&current, &policy, Utc::now()).unwrap();
    assert!(again.compressed.is_empty());
}

#[test]
fn format_size_units() {
    assert_eq!(format_size(100), "100 B");
    assert_eq!(format_size(1024), "1.00 KB");
    assert_eq!(format_size(5 * 1024 * 1024), "5.00 MB");
    assert_eq!(format_size(1024 * 1024 * 1024), "1.00 GB");
}
