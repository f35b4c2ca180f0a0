//! Tests for the size-rotated file sink.

use chrono::{TimeDelta, Utc};
use std::fs;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;
use usermgmt_log::retention::{backup_path, list_backups};
use usermgmt_log::{RotatingFile, RotationPolicy};

fn line(tag: char, len: usize) -> Vec<u8> {
    let mut bytes = vec![tag as u8; len - 1];
    bytes.push(b'\n');
    bytes
}

#[test]
fn first_write_creates_file_and_parents() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("app.log");
    let file = RotatingFile::new(&path, RotationPolicy::new());

    assert!(!path.exists());
    file.write(b"hello\n").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "hello\n");
    assert_eq!(file.size(), 6);
}

#[test]
fn appends_to_existing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.log");
    fs::write(&path, "old\n").unwrap();

    let file = RotatingFile::new(&path, RotationPolicy::new().max_size_bytes(1024));
    file.write(b"new\n").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "old\nnew\n");
    assert_eq!(file.size(), 8);
}

#[test]
fn rotates_before_exceeding_threshold() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.log");
    let file = RotatingFile::new(&path, RotationPolicy::new().max_size_bytes(250));

    file.write(&line('a', 100)).unwrap();
    file.write(&line('b', 100)).unwrap();
    assert!(list_backups(&path).unwrap().is_empty());

    // 300 bytes would exceed 250: the first two records move to a backup
    file.write(&line('c', 100)).unwrap();

    let backups = list_backups(&path).unwrap();
    assert_eq!(backups.len(), 1);
    assert_eq!(backups[0].size, 200);
    assert_eq!(fs::read(&path).unwrap(), line('c', 100));
    assert!(file.size() < 250);
}

#[test]
fn existing_full_file_rotates_on_first_write() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.log");
    fs::write(&path, vec![b'x'; 90]).unwrap();

    let file = RotatingFile::new(&path, RotationPolicy::new().max_size_bytes(100));
    file.write(&line('y', 20)).unwrap();

    assert_eq!(list_backups(&path).unwrap().len(), 1);
    assert_eq!(fs::read(&path).unwrap(), line('y', 20));
}

#[test]
fn expired_backups_are_pruned_without_rotation() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.log");
    fs::write(&path, "earlier run\n").unwrap();
    let expired = backup_path(&path, Utc::now() - TimeDelta::days(30));
    fs::write(&expired, "old\n").unwrap();
    let recent = backup_path(&path, Utc::now() - TimeDelta::hours(2));
    fs::write(&recent, "recent\n").unwrap();

    let policy = RotationPolicy::new()
        .max_size_bytes(1024 * 1024)
        .max_age_days(1);
    let file = RotatingFile::new(&path, policy);
    for _ in 0..100 {
        file.write(&line('k', 50)).unwrap();
    }

    assert!(!expired.exists());
    assert!(recent.exists());
    assert_eq!(list_backups(&path).unwrap().len(), 1);
}

#[test]
fn fresh_file_also_prunes_expired_backups() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.log");
    let expired = backup_path(&path, Utc::now() - TimeDelta::days(10));
    fs::write(&expired, "old\n").unwrap();

    let file = RotatingFile::new(&path, RotationPolicy::new().max_age_days(3));
    file.write(b"first\n").unwrap();

    assert!(!expired.exists());
    assert_eq!(fs::read_to_string(&path).unwrap(), "first\n");
}

#[test]
fn oversized_record_is_written_whole() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.log");
    let file = RotatingFile::new(&path, RotationPolicy::new().max_size_bytes(50));

    file.write(&line('a', 10)).unwrap();
    file.write(&line('b', 120)).unwrap();

    assert_eq!(fs::read(&path).unwrap(), line('b', 120));
    assert_eq!(list_backups(&path).unwrap().len(), 1);
}

#[test]
fn backup_count_never_exceeds_limit() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.log");
    let policy = RotationPolicy::new().max_size_bytes(1000).max_backups(3);
    let file = RotatingFile::new(&path, policy);

    for _ in 0..100 {
        file.write(&line('r', 100)).unwrap();
        assert!(list_backups(&path).unwrap().len() <= 3);
    }

    let backups = list_backups(&path).unwrap();
    assert_eq!(backups.len(), 3);
    for backup in &backups {
        assert_eq!(backup.size % 100, 0);
    }
    assert!(file.size() <= 1000);
}

#[test]
fn zero_size_disables_rotation() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.log");
    let file = RotatingFile::new(&path, RotationPolicy::new());

    for _ in 0..50 {
        file.write(&line('z', 100)).unwrap();
    }

    assert!(list_backups(&path).unwrap().is_empty());
    assert_eq!(file.size(), 5000);
}

#[test]
fn forced_rotation_starts_empty_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.log");
    let file = RotatingFile::new(&path, RotationPolicy::new());

    file.write(b"before\n").unwrap();
    file.rotate().unwrap();
    file.write(b"after\n").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "after\n");
    let backups = list_backups(&path).unwrap();
    assert_eq!(backups.len(), 1);
    assert_eq!(fs::read_to_string(&backups[0].path).unwrap(), "before\n");
}

#[test]
fn back_to_back_rotations_get_distinct_names() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.log");
    let file = RotatingFile::new(&path, RotationPolicy::new());

    for i in 0..5 {
        file.write(format!("{i}\n").as_bytes()).unwrap();
        file.rotate().unwrap();
    }

    assert_eq!(list_backups(&path).unwrap().len(), 5);
}

#[test]
fn close_then_write_reopens() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.log");
    let file = RotatingFile::new(&path, RotationPolicy::new());

    file.write(b"one\n").unwrap();
    file.close().unwrap();
    file.write(b"two\n").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo\n");
}

#[test]
fn concurrent_writers_never_split_records() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.log");
    let file = Arc::new(RotatingFile::new(
        &path,
        RotationPolicy::new().max_size_bytes(2000),
    ));

    let handles: Vec<_> = ['a', 'b', 'c', 'd']
        .into_iter()
        .map(|tag| {
            let file = Arc::clone(&file);
            thread::spawn(move || {
                for _ in 0..50 {
                    file.write(&line(tag, 64)).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let mut files: Vec<_> = list_backups(&path)
        .unwrap()
        .into_iter()
        .map(|b| b.path)
        .collect();
    files.push(path.clone());

    let mut total_lines = 0;
    for f in files {
        let content = fs::read_to_string(f).unwrap();
        for l in content.lines() {
            assert_eq!(l.len(), 63);
            let first = l.chars().next().unwrap();
            assert!(l.chars().all(|c| c == first));
            total_lines += 1;
        }
    }
    assert_eq!(total_lines, 200);
}
