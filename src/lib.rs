//! `usermgmt-log` - dual-channel structured logging for the user-management service.
//!
//! The service owns two loggers for its whole lifetime: `system` for lifecycle
//! events and `access` for per-request records. Each one:
//! - filters by a severity threshold (`debug` through `fatal`)
//! - encodes records as JSON lines or plain text
//! - appends to a size-rotated file with count and age retention
//! - mirrors every record to stdout, which keeps working if the file fails
//!
//! # Example
//!
//! ```no_run
//! use usermgmt_log::{Field, LoggerBuilder, LoggerRegistry};
//!
//! let config = LoggerBuilder::new()
//!     .logger_type("system")
//!     .file_path("logs/usermanagement.log")
//!     .format("json")
//!     .level("info")
//!     .build();
//!
//! let registry = LoggerRegistry::new();
//! let system = registry.get_logger(&config)?;
//!
//! system.info("server started", &[Field::new("port", 8080)]);
//! system.warnf(format_args!("{} users pending verification", 3));
//! # Ok::<(), usermgmt_log::Error>(())
//! ```
//!
//! # Features
//!
//! - `cli` (default): the `usermgmt-log` operator binary

pub mod config;
pub mod encoder;
pub mod internal;
pub mod level;
pub mod logger;
pub mod registry;
pub mod retention;
pub mod sink;

mod error;

#[cfg(feature = "cli")]
pub mod cli;

pub use config::{ConfigError, Settings};
pub use encoder::{Caller, Encoder, Field, Format, JsonEncoder, PlainEncoder, Record, Value};
pub use error::Error;
pub use level::Level;
pub use logger::{Logger, LoggerBuilder, LoggerKind, LoggingConfig};
pub use registry::{LoggerRegistry, SlotState};
pub use retention::{Backup, PruneResult, RotationPolicy};
pub use sink::{MirroredSink, RotatingFile, Sink, StdoutSink};
