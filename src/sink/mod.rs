//! Write targets for encoded records. A logger owns one [`MirroredSink`]: the
//! rotating log file plus an always-on mirror (stdout) that keeps working when
//! the file does not.

mod mirrored;
mod rotating;

pub use mirrored::MirroredSink;
pub use rotating::RotatingFile;

use std::io::{self, Write};

/// `Send + Sync` so every request thread can write through one shared handle.
pub trait Sink: Send + Sync {
    /// Writes one complete, newline-terminated record. Implementations must not
    /// interleave the bytes of concurrent records.
    ///
    /// # Errors
    /// I/O errors from the underlying target.
    fn write_record(&self, bytes: &[u8]) -> Result<(), crate::Error>;

    /// Pushes buffered bytes to the target.
    ///
    /// # Errors
    /// I/O errors from the underlying target.
    fn flush(&self) -> Result<(), crate::Error>;
}

/// Process stdout. Each record is written under the stdout lock in one call.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl Sink for StdoutSink {
    fn write_record(&self, bytes: &[u8]) -> Result<(), crate::Error> {
        io::stdout().lock().write_all(bytes)?;
        Ok(())
    }

    fn flush(&self) -> Result<(), crate::Error> {
        io::stdout().lock().flush()?;
        Ok(())
    }
}
