//! Tee from the rotating file to a secondary sink. The two halves fail
//! independently: a full disk degrades the logger to mirror-only output.

use super::{RotatingFile, Sink};
use crate::internal;
use std::sync::atomic::{AtomicU64, Ordering};

pub struct MirroredSink {
    file: RotatingFile,
    mirror: Box<dyn Sink>,
    /// File writes that failed since construction.
    failures: AtomicU64,
}

impl MirroredSink {
    #[must_use]
    pub fn new(file: RotatingFile, mirror: Box<dyn Sink>) -> Self {
        Self {
            file,
            mirror,
            failures: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub const fn file(&self) -> &RotatingFile {
        &self.file
    }

    /// Number of records that reached the mirror but not the file.
    #[must_use]
    pub fn write_failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }

    /// Flushes both halves, then releases the file handle.
    ///
    /// # Errors
    /// The first failure among flush and close; both are always attempted.
    pub fn close(&self) -> Result<(), crate::Error> {
        let flushed = self.flush();
        let closed = self.file.close();
        flushed.and(closed)
    }
}

impl Sink for MirroredSink {
    /// Only the mirror's result is returned; file failures are counted and
    /// reported on the diagnostic channel.
    fn write_record(&self, bytes: &[u8]) -> Result<(), crate::Error> {
        let mirrored = self.mirror.write_record(bytes);

        if let Err(e) = self.file.write(bytes) {
            self.failures.fetch_add(1, Ordering::Relaxed);
            internal::error("SINK", &e.to_string());
        }

        mirrored
    }

    fn flush(&self) -> Result<(), crate::Error> {
        let mirrored = self.mirror.flush();
        let file = self.file.flush();
        mirrored.and(file)
    }
}

impl std::fmt::Debug for MirroredSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MirroredSink")
            .field("file", &self.file.path())
            .field("write_failures", &self.write_failures())
            .finish_non_exhaustive()
    }
}
