//! Operator entry point.
//!
//! Usage:
//!   usermgmt-log [--config <path>] log <channel> <level> <msg...> [-f k=v]...
//!   usermgmt-log [--config <path>] backups <channel>
//!   usermgmt-log [--config <path>] rotate <channel>

use clap::Parser;
use std::process::ExitCode;
use usermgmt_log::cli::{Cli, Command, cmd_backups, cmd_log, cmd_rotate};
use usermgmt_log::config::Settings;
use usermgmt_log::{LoggerRegistry, internal};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Settings decide file paths and thresholds, so nothing is logged before they load
    let settings = match Settings::load(cli.config.as_deref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading settings: {e}");
            return ExitCode::FAILURE;
        }
    };

    let registry = LoggerRegistry::global();
    let code = match cli.command {
        Command::Log {
            channel,
            level,
            message,
            fields,
        } => cmd_log(
            registry,
            &settings,
            channel.into(),
            level.into(),
            &message,
            &fields,
        ),
        Command::Backups { channel } => cmd_backups(&settings, channel.into()),
        Command::Rotate { channel } => cmd_rotate(registry, &settings, channel.into()),
    };

    if let Err(e) = registry.shutdown() {
        internal::warn("CLI", &format!("Shutdown incomplete: {e}"));
    }
    code
}
