//! `usermgmt-log rotate <channel>`

use crate::config::Settings;
use crate::internal;
use crate::logger::LoggerKind;
use crate::registry::LoggerRegistry;
use std::process::ExitCode;

#[must_use]
pub fn cmd_rotate(registry: &LoggerRegistry, settings: &Settings, kind: LoggerKind) -> ExitCode {
    let config = settings.logging_config(kind);
    let result = registry
        .get_logger(&config)
        .and_then(|logger| logger.rotate().map(|()| logger));

    match result {
        Ok(logger) => {
            println!("Rotated {}", logger.file_path().display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            internal::error("CLI", &format!("Rotation of {kind} log failed: {e}"));
            ExitCode::FAILURE
        }
    }
}
