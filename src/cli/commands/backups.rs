//! `usermgmt-log backups <channel>`

use crate::config::Settings;
use crate::internal;
use crate::logger::LoggerKind;
use crate::retention::{format_size, list_backups};
use chrono::Utc;
use std::process::ExitCode;

#[must_use]
pub fn cmd_backups(settings: &Settings, kind: LoggerKind) -> ExitCode {
    let config = settings.logging_config(kind);
    let current = config.file_path();

    let backups = match list_backups(current) {
        Ok(b) => b,
        Err(e) => {
            internal::error("CLI", &format!("Cannot list backups: {e}"));
            return ExitCode::FAILURE;
        }
    };

    if backups.is_empty() {
        println!("No backups of {}", current.display());
        return ExitCode::SUCCESS;
    }

    let now = Utc::now();
    let total: u64 = backups.iter().map(|b| b.size).sum();
    println!(
        "{} backup(s) of {}, {}",
        backups.len(),
        current.display(),
        format_size(total)
    );
    for backup in &backups {
        let age = match backup.age_days(now) {
            0 => "today".to_string(),
            1 => "1 day".to_string(),
            n => format!("{n} days"),
        };
        println!(
            "  {} ({}, {age})",
            backup.path.display(),
            format_size(backup.size)
        );
    }
    ExitCode::SUCCESS
}
