//! `usermgmt-log log <channel> <level> <message...> [-f key=value]...`

use crate::config::Settings;
use crate::encoder::Field;
use crate::internal;
use crate::level::Level;
use crate::logger::LoggerKind;
use crate::registry::LoggerRegistry;
use std::process::ExitCode;

#[must_use]
pub fn cmd_log(
    registry: &LoggerRegistry,
    settings: &Settings,
    kind: LoggerKind,
    level: Level,
    message: &[String],
    fields: &[Field],
) -> ExitCode {
    let config = settings.logging_config(kind);
    let logger = match registry.get_logger(&config) {
        Ok(logger) => logger,
        Err(e) => {
            internal::error("CLI", &format!("Cannot open {kind} logger: {e}"));
            return ExitCode::FAILURE;
        }
    };

    logger.log(level, &message.join(" "), fields);

    if logger.write_failures() > 0 {
        // Already reported on the diagnostic channel; the exit code tells scripts
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
