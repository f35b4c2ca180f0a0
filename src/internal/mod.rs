//! The subsystem's own diagnostic channel. Problems inside the logging
//! pipeline are reported here instead of reaching logging callers.
//!
//! Lines go to stdout, the same stream the loggers mirror to, so operators see
//! them interleaved with the records they concern. The threshold is read once
//! from `USERMGMT_LOG_INTERNAL` (default `warn`).

use crate::level::Level;
use chrono::{Local, SecondsFormat};
use std::io::Write;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};

/// Environment variable holding the diagnostic threshold.
pub const THRESHOLD_ENV: &str = "USERMGMT_LOG_INTERNAL";

static THRESHOLD: OnceLock<Level> = OnceLock::new();
static REPORTED_ERRORS: AtomicU64 = AtomicU64::new(0);

fn threshold() -> Level {
    *THRESHOLD.get_or_init(|| {
        std::env::var(THRESHOLD_ENV)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(Level::Warn)
    })
}

fn log(level: Level, scope: &str, msg: &str) {
    if level >= Level::Error {
        REPORTED_ERRORS.fetch_add(1, Ordering::Relaxed);
    }
    if level < threshold() {
        return;
    }

    let line = format!(
        "{} {} usermgmt-log {scope}: {msg}\n",
        Local::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        level.as_capital_str(),
    );
    // Nowhere left to report a failing stdout
    let _ = std::io::stdout().lock().write_all(line.as_bytes());
}

/// Startup and teardown details.
pub fn debug(scope: &str, msg: &str) {
    log(Level::Debug, scope, msg);
}

/// Rotations and other expected lifecycle events.
pub fn info(scope: &str, msg: &str) {
    log(Level::Info, scope, msg);
}

/// Recoverable anomalies such as a backup that could not be compressed.
pub fn warn(scope: &str, msg: &str) {
    log(Level::Warn, scope, msg);
}

/// Failed writes and rotations; always counted, even when filtered.
pub fn error(scope: &str, msg: &str) {
    log(Level::Error, scope, msg);
}

/// Errors reported through this channel since process start.
#[must_use]
pub fn reported_errors() -> u64 {
    REPORTED_ERRORS.load(Ordering::Relaxed)
}
