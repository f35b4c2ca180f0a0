//! The handle collaborators log through. Every call, structured or formatted,
//! passes one threshold check and then the logger's encoder and sink.

mod builder;
mod config;

pub use builder::LoggerBuilder;
pub use config::{LoggerKind, LoggingConfig};

use crate::encoder::{Caller, Encoder, Field, Record};
use crate::internal;
use crate::level::Level;
use crate::retention::RotationPolicy;
use crate::sink::{MirroredSink, RotatingFile, Sink};
use chrono::Local;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt;
use std::panic::Location;
use std::path::Path;
use std::sync::Arc;

/// Shared by a logger and all children derived with `with`/`named`.
struct Core {
    kind: LoggerKind,
    level: Level,
    capture_caller: bool,
    encoder: Box<dyn Encoder>,
    sink: MirroredSink,
}

impl Core {
    fn write(&self, record: &Record<'_>) {
        let mut buf = Vec::with_capacity(128 + record.message.len());
        if let Err(e) = self.encoder.encode(record, &mut buf) {
            internal::error("ENCODE", &format!("Dropped {} record: {e}", self.kind));
            return;
        }
        if let Err(e) = self.sink.write_record(&buf) {
            internal::error("SINK", &format!("Mirror write failed: {e}"));
        }
    }
}

/// Cheap to clone; clones share the encoder and sink.
#[derive(Clone)]
pub struct Logger {
    core: Arc<Core>,
    name: String,
    /// Fields bound with `with`, prepended to every record.
    context: Vec<Field>,
}

impl Logger {
    /// Constructs the encoder, rotating sink and threshold for a validated config.
    /// Only the registry calls this, which keeps construction at most once per kind.
    pub(crate) fn from_config(
        kind: LoggerKind,
        config: &LoggingConfig,
        mirror: Box<dyn Sink>,
    ) -> Result<Self, crate::Error> {
        if config.file_path.trim().is_empty() {
            return Err(crate::config::ConfigError::EmptyFilePath.into());
        }

        let path = shellexpand::tilde(&config.file_path).into_owned();
        let file = RotatingFile::new(path, RotationPolicy::from_config(config));

        Ok(Self {
            core: Arc::new(Core {
                kind,
                level: config.level,
                capture_caller: config.capture_caller,
                encoder: config.format.encoder(),
                sink: MirroredSink::new(file, mirror),
            }),
            name: String::new(),
            context: Vec::new(),
        })
    }

    #[must_use]
    pub fn kind(&self) -> LoggerKind {
        self.core.kind
    }

    /// The configured threshold.
    #[must_use]
    pub fn level(&self) -> Level {
        self.core.level
    }

    /// Empty for the root handle of a channel.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn file_path(&self) -> &Path {
        self.core.sink.file().path()
    }

    /// Records that reached stdout but not the log file.
    #[must_use]
    pub fn write_failures(&self) -> u64 {
        self.core.sink.write_failures()
    }

    #[must_use]
    pub fn enabled(&self, level: Level) -> bool {
        level >= self.core.level
    }

    /// Child logger that adds `fields` to every record it writes.
    #[must_use]
    pub fn with(&self, fields: &[Field]) -> Self {
        let mut context = self.context.clone();
        context.extend_from_slice(fields);
        Self {
            core: Arc::clone(&self.core),
            name: self.name.clone(),
            context,
        }
    }

    /// Child logger whose name is this one's, dot-joined with `name`.
    #[must_use]
    pub fn named(&self, name: &str) -> Self {
        let name = if self.name.is_empty() {
            name.to_string()
        } else {
            format!("{}.{name}", self.name)
        };
        Self {
            core: Arc::clone(&self.core),
            name,
            context: self.context.clone(),
        }
    }

    /// Renders and writes one record if `level` passes the threshold.
    /// No side effects: `log`, `panic` and `fatal` add those.
    #[track_caller]
    fn write_entry(&self, level: Level, message: &str, fields: &[Field]) {
        if !self.enabled(level) {
            return;
        }

        // Resolved here, not in a closure: closures do not propagate `track_caller`
        let location = Location::caller();
        let caller = self
            .core
            .capture_caller
            .then(|| Caller::from_location(location));

        // Honors RUST_BACKTRACE, so production pays nothing unless it opts in
        let stacktrace = (level >= Level::Error)
            .then(Backtrace::capture)
            .filter(|bt| bt.status() == BacktraceStatus::Captured)
            .map(|bt| bt.to_string());

        let record = Record {
            time: Local::now().fixed_offset(),
            level,
            logger_name: &self.name,
            caller,
            message,
            context: &self.context,
            fields,
            stacktrace: stacktrace.as_deref(),
        };
        self.core.write(&record);
    }

    fn exit(&self) -> ! {
        let _ = self.flush();
        std::process::exit(1)
    }

    /// Structured entry point for a runtime-chosen level.
    ///
    /// `Panic` panics and `Fatal` exits the process after writing, even when
    /// the threshold filtered the record out.
    #[track_caller]
    pub fn log(&self, level: Level, msg: &str, fields: &[Field]) {
        self.write_entry(level, msg, fields);
        match level {
            Level::Panic => panic!("{msg}"),
            Level::Fatal => self.exit(),
            _ => {}
        }
    }

    /// Formatted entry point; the message is only rendered when it will be used.
    #[track_caller]
    pub fn logf(&self, level: Level, args: fmt::Arguments<'_>) {
        if !self.enabled(level) && level < Level::Panic {
            return;
        }
        let msg = args.to_string();
        self.log(level, &msg, &[]);
    }

    #[track_caller]
    pub fn debug(&self, msg: &str, fields: &[Field]) {
        self.write_entry(Level::Debug, msg, fields);
    }

    #[track_caller]
    pub fn info(&self, msg: &str, fields: &[Field]) {
        self.write_entry(Level::Info, msg, fields);
    }

    #[track_caller]
    pub fn warn(&self, msg: &str, fields: &[Field]) {
        self.write_entry(Level::Warn, msg, fields);
    }

    #[track_caller]
    pub fn error(&self, msg: &str, fields: &[Field]) {
        self.write_entry(Level::Error, msg, fields);
    }

    /// Logged only; this crate always runs with production semantics.
    #[track_caller]
    pub fn dpanic(&self, msg: &str, fields: &[Field]) {
        self.write_entry(Level::DPanic, msg, fields);
    }

    /// Writes the record, then panics with `msg`.
    #[track_caller]
    pub fn panic(&self, msg: &str, fields: &[Field]) -> ! {
        self.write_entry(Level::Panic, msg, fields);
        panic!("{msg}")
    }

    /// Writes the record, flushes, then exits the process with status 1.
    #[track_caller]
    pub fn fatal(&self, msg: &str, fields: &[Field]) -> ! {
        self.write_entry(Level::Fatal, msg, fields);
        self.exit()
    }

    #[track_caller]
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.logf(Level::Debug, args);
    }

    #[track_caller]
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.logf(Level::Info, args);
    }

    #[track_caller]
    pub fn warnf(&self, args: fmt::Arguments<'_>) {
        self.logf(Level::Warn, args);
    }

    #[track_caller]
    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.logf(Level::Error, args);
    }

    #[track_caller]
    pub fn dpanicf(&self, args: fmt::Arguments<'_>) {
        self.logf(Level::DPanic, args);
    }

    #[track_caller]
    pub fn panicf(&self, args: fmt::Arguments<'_>) -> ! {
        let msg = args.to_string();
        self.panic(&msg, &[])
    }

    #[track_caller]
    pub fn fatalf(&self, args: fmt::Arguments<'_>) -> ! {
        let msg = args.to_string();
        self.fatal(&msg, &[])
    }

    /// Forces a rotation of the log file, e.g. from a signal handler.
    ///
    /// # Errors
    /// `SinkWrite` when the rename or reopen fails.
    pub fn rotate(&self) -> Result<(), crate::Error> {
        self.core.sink.file().rotate()
    }

    /// # Errors
    /// The first I/O error from stdout or the log file.
    pub fn flush(&self) -> Result<(), crate::Error> {
        self.core.sink.flush()
    }

    /// Flushes and releases the file handle; later writes reopen it.
    pub(crate) fn close(&self) -> Result<(), crate::Error> {
        self.core.sink.close()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("kind", &self.core.kind)
            .field("level", &self.core.level)
            .field("format", &self.core.encoder.format())
            .field("name", &self.name)
            .field("sink", &self.core.sink)
            .finish_non_exhaustive()
    }
}
