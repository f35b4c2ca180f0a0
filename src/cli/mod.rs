//! Operator CLI: emit a record through a configured channel, inspect its
//! backups, or force a rotation (e.g. from logrotate's `postrotate`).

pub mod commands;

use crate::encoder::Field;
use crate::level::Level;
use crate::logger::LoggerKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Channel selector for CLI arguments.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum Channel {
    System,
    Access,
}

impl From<Channel> for LoggerKind {
    fn from(channel: Channel) -> Self {
        match channel {
            Channel::System => Self::System,
            Channel::Access => Self::Access,
        }
    }
}

/// Levels that make sense from a shell; `panic` and `fatal` are left out
/// because they would abort the tool itself.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
    Dpanic,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => Self::Debug,
            LogLevel::Info => Self::Info,
            LogLevel::Warn => Self::Warn,
            LogLevel::Error => Self::Error,
            LogLevel::Dpanic => Self::DPanic,
        }
    }
}

/// usermgmt-log - Operate the user-management service logs.
#[derive(Parser)]
#[command(
    name = "usermgmt-log",
    version,
    about = "Operate the user-management service logs"
)]
pub struct Cli {
    /// Settings file (TOML); USERMGMT_LOG_* variables override it
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Write one record through a channel.
    Log {
        #[arg(value_enum)]
        channel: Channel,
        #[arg(value_enum)]
        level: LogLevel,
        /// Message words, joined with spaces
        #[arg(required = true)]
        message: Vec<String>,
        /// Structured field, repeatable
        #[arg(short, long = "field", value_name = "KEY=VALUE", value_parser = parse_field)]
        fields: Vec<Field>,
    },
    /// List a channel's rotated files, newest first.
    Backups {
        #[arg(value_enum)]
        channel: Channel,
    },
    /// Rotate a channel's log file now and apply retention.
    Rotate {
        #[arg(value_enum)]
        channel: Channel,
    },
}

/// Splits `key=value` at the first `=`; the value may itself contain `=`.
///
/// # Errors
/// Missing `=` or an empty key.
pub fn parse_field(arg: &str) -> Result<Field, String> {
    match arg.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok(Field::new(key, value)),
        _ => Err(format!("expected KEY=VALUE, got '{arg}'")),
    }
}

pub use commands::{cmd_backups, cmd_log, cmd_rotate};
