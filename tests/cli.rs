#![cfg(feature = "cli")]
//! Argument parsing for the operator binary.

use clap::Parser;
use usermgmt_log::cli::{Cli, Command, parse_field};
use usermgmt_log::{Level, LoggerKind, Value};

#[test]
fn field_splits_at_first_equals() {
    let field = parse_field("query=a=b").unwrap();
    assert_eq!(field.key, "query");
    assert_eq!(field.value, Value::Str("a=b".to_string()));

    assert!(parse_field("novalue").is_err());
    assert!(parse_field("=value").is_err());
}

#[test]
fn log_command_parses() {
    let cli = Cli::try_parse_from([
        "usermgmt-log",
        "-c",
        "/etc/um/logging.toml",
        "log",
        "access",
        "warn",
        "slow",
        "request",
        "-f",
        "ms=812",
    ])
    .unwrap();

    assert_eq!(
        cli.config.as_deref().and_then(|p| p.to_str()),
        Some("/etc/um/logging.toml")
    );
    match cli.command {
        Command::Log {
            channel,
            level,
            message,
            fields,
        } => {
            assert_eq!(LoggerKind::from(channel), LoggerKind::Access);
            assert_eq!(Level::from(level), Level::Warn);
            assert_eq!(message, ["slow", "request"]);
            assert_eq!(fields.len(), 1);
            assert_eq!(fields[0].key, "ms");
        }
        _ => panic!("expected log command"),
    }
}

#[test]
fn panic_and_fatal_are_not_offered() {
    assert!(Cli::try_parse_from(["usermgmt-log", "log", "system", "fatal", "bye"]).is_err());
    assert!(Cli::try_parse_from(["usermgmt-log", "log", "system", "panic", "bye"]).is_err());
}

#[test]
fn message_is_required() {
    assert!(Cli::try_parse_from(["usermgmt-log", "log", "system", "info"]).is_err());
}
