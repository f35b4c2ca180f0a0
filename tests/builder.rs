//! Tests for the configuration builder.

use usermgmt_log::{Format, Level, LoggerBuilder, LoggerKind, LoggingConfig};

#[test]
fn builder_defaults() {
    let config = LoggerBuilder::new().build();
    assert_eq!(config.logger_type(), "system");
    assert_eq!(config.file_path().to_str(), Some("usermanagement.log"));
    assert_eq!(config.format(), Format::Plain);
    assert_eq!(config.level(), Level::Debug);
    assert_eq!(config.max_size_mb(), 5);
    assert_eq!(config.max_backups(), 10);
    assert_eq!(config.max_age_days(), 15);
    assert!(!config.capture_caller());
    assert!(!config.compress_backups());
    assert_eq!(config, LoggingConfig::default());
}

#[test]
fn setters_are_order_independent() {
    let a = LoggerBuilder::new()
        .logger_type("access")
        .file_path("/tmp/a.log")
        .format("json")
        .level("warn")
        .max_size_mb(1)
        .max_backups(2)
        .max_age_days(3)
        .capture_caller(true)
        .build();

    let b = LoggerBuilder::new()
        .capture_caller(true)
        .max_age_days(3)
        .level("warn")
        .max_backups(2)
        .format("json")
        .max_size_mb(1)
        .file_path("/tmp/a.log")
        .logger_type("access")
        .build();

    assert_eq!(a, b);
}

#[test]
fn build_snapshots_by_value() {
    let mut builder = LoggerBuilder::new();
    builder.level("info").file_path("first.log");
    let first = builder.build();

    builder.level("error").file_path("second.log");
    let second = builder.build();

    assert_eq!(first.level(), Level::Info);
    assert_eq!(first.file_path().to_str(), Some("first.log"));
    assert_eq!(second.level(), Level::Error);
    assert_eq!(second.file_path().to_str(), Some("second.log"));
}

#[test]
fn unknown_format_falls_back_to_plain() {
    let config = LoggerBuilder::new().format("yaml").build();
    assert_eq!(config.format(), Format::Plain);

    let config = LoggerBuilder::new().format("JSON").build();
    assert_eq!(config.format(), Format::Json);
}

#[test]
fn unknown_level_falls_back_to_debug() {
    let config = LoggerBuilder::new().level("loud").build();
    assert_eq!(config.level(), Level::Debug);
}

#[test]
fn build_does_not_validate() {
    let config = LoggerBuilder::new().logger_type("bogus").file_path("").build();
    assert_eq!(config.logger_type(), "bogus");
    assert!(config.kind().is_err());
}

#[test]
fn typed_setters() {
    let config = LoggerBuilder::new()
        .kind(LoggerKind::Access)
        .encoding(Format::Json)
        .min_level(Level::Error)
        .compress_backups(true)
        .build();
    assert_eq!(config.kind().unwrap(), LoggerKind::Access);
    assert_eq!(config.format(), Format::Json);
    assert_eq!(config.level(), Level::Error);
    assert!(config.compress_backups());
}

#[test]
fn zero_limits_are_kept() {
    let config = LoggerBuilder::new()
        .max_size_mb(0)
        .max_backups(0)
        .max_age_days(0)
        .build();
    assert_eq!(config.max_size_mb(), 0);
    assert_eq!(config.max_backups(), 0);
    assert_eq!(config.max_age_days(), 0);
}
