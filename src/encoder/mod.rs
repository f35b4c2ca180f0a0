//! Serialization strategies that turn one log record into one line of bytes.
//!
//! The logger never knows which layout it writes: it hands a [`Record`] to the
//! configured [`Encoder`] and passes the resulting bytes to its sink.

mod json;
mod plain;
mod value;

pub use json::JsonEncoder;
pub use plain::PlainEncoder;
pub use value::{Field, Value};

use crate::level::Level;
use chrono::{DateTime, FixedOffset, SecondsFormat};
use std::fmt;
use std::panic::Location;

/// Layout selector read from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Format {
    /// One JSON object per line.
    Json,
    /// One human-readable line per record.
    #[default]
    Plain,
}

impl Format {
    /// Only `json` (any casing) selects JSON; every other string, including
    /// typos and the empty string, falls back to plain text.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Plain
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Plain => "plain",
        }
    }

    /// Builds the strategy for this layout.
    #[must_use]
    pub fn encoder(self) -> Box<dyn Encoder> {
        match self {
            Self::Json => Box::new(JsonEncoder),
            Self::Plain => Box::new(PlainEncoder),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source location of a logging call, rendered as `dir/file.rs:line`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub file: &'static str,
    pub line: u32,
}

impl Caller {
    #[must_use]
    pub fn from_location(location: &'static Location<'static>) -> Self {
        Self {
            file: location.file(),
            line: location.line(),
        }
    }

    /// Trims the path to its last directory and file name.
    #[must_use]
    pub fn short_file(&self) -> &'static str {
        let file = self.file;
        let Some(last) = file.rfind(['/', '\\']) else {
            return file;
        };
        file[..last]
            .rfind(['/', '\\'])
            .map_or(file, |prev| &file[prev + 1..])
    }
}

impl fmt::Display for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.short_file(), self.line)
    }
}

/// Everything an encoder needs to render one line. Borrowed so the hot path
/// does not clone messages or fields.
#[derive(Debug, Clone)]
pub struct Record<'a> {
    pub time: DateTime<FixedOffset>,
    pub level: Level,
    /// Empty for root loggers.
    pub logger_name: &'a str,
    pub caller: Option<Caller>,
    pub message: &'a str,
    /// Fields bound with `Logger::with`, rendered before the call's own fields.
    pub context: &'a [Field],
    pub fields: &'a [Field],
    /// Only rendered for `Error` and above.
    pub stacktrace: Option<&'a str>,
}

impl<'a> Record<'a> {
    /// Context fields first, then the call's fields, both in insertion order.
    pub fn all_fields(&self) -> impl Iterator<Item = &'a Field> + use<'a> {
        let context = self.context;
        let fields = self.fields;
        context.iter().chain(fields.iter())
    }

    /// RFC 3339 with second precision, `Z` for UTC.
    #[must_use]
    pub fn timestamp(&self) -> String {
        self.time.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    fn stacktrace_for_level(&self) -> Option<&'a str> {
        if self.level >= Level::Error {
            self.stacktrace.filter(|trace| !trace.is_empty())
        } else {
            None
        }
    }
}

/// `Send + Sync` so one encoder can serve every thread logging through a handle.
pub trait Encoder: Send + Sync {
    /// Appends exactly one newline-terminated record to `buf`.
    ///
    /// # Errors
    /// Serialization failures from the underlying format.
    fn encode(&self, record: &Record<'_>, buf: &mut Vec<u8>) -> Result<(), crate::Error>;

    /// The layout this encoder produces.
    fn format(&self) -> Format;
}
