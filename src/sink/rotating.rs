//! Size-rotated log file. The size check, the rotation and the write all
//! happen under one mutex, so a record that triggers rotation lands whole in
//! the fresh file before any other writer gets a turn.

use super::Sink;
use crate::internal;
use crate::retention::{self, RotationPolicy, backup_path};
use chrono::{DateTime, TimeDelta, Utc};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct FileState {
    /// `None` until the first write, and again after `close`.
    file: Option<File>,
    size: u64,
    /// Guards against two rotations in the same millisecond sharing a name.
    last_backup: Option<DateTime<Utc>>,
}

#[derive(Debug)]
pub struct RotatingFile {
    path: PathBuf,
    policy: RotationPolicy,
    state: Mutex<FileState>,
}

impl RotatingFile {
    /// Performs no I/O; the file is opened (or created) by the first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, policy: RotationPolicy) -> Self {
        Self {
            path: path.into(),
            policy,
            state: Mutex::new(FileState::default()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn policy(&self) -> &RotationPolicy {
        &self.policy
    }

    /// Bytes in the current file as tracked by the sink; zero before the first write.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.lock().size
    }

    // A panic while holding the lock leaves the state consistent enough to keep logging
    fn lock(&self) -> MutexGuard<'_, FileState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn sink_error(&self, source: io::Error) -> crate::Error {
        crate::Error::SinkWrite {
            path: self.path.clone(),
            source,
        }
    }

    /// Appends one record, rotating first if it would overflow the size limit.
    ///
    /// # Errors
    /// `SinkWrite` when the file cannot be opened, rotated or written.
    pub fn write(&self, buf: &[u8]) -> Result<(), crate::Error> {
        let incoming = buf.len() as u64;
        let mut state = self.lock();

        if state.file.is_none() {
            self.open_existing_or_new(&mut state, incoming)?;
        } else if self.policy.needs_rotation(state.size, incoming) {
            self.rotate_locked(&mut state)?;
        }

        let Some(file) = state.file.as_mut() else {
            return Err(self.sink_error(io::Error::other("log file not open")));
        };
        file.write_all(buf).map_err(|e| self.sink_error(e))?;
        state.size += incoming;
        Ok(())
    }

    /// Closes the current file and starts a new one, regardless of size.
    ///
    /// # Errors
    /// `SinkWrite` when the rename or the reopen fails.
    pub fn rotate(&self) -> Result<(), crate::Error> {
        let mut state = self.lock();
        self.rotate_locked(&mut state)
    }

    /// Syncs and releases the file handle. A later write reopens it.
    ///
    /// # Errors
    /// `SinkWrite` when the final sync fails.
    pub fn close(&self) -> Result<(), crate::Error> {
        let mut state = self.lock();
        if let Some(file) = state.file.take() {
            file.sync_all().map_err(|e| self.sink_error(e))?;
        }
        Ok(())
    }

    /// Resumes an existing file, unless the pending record would overflow it.
    fn open_existing_or_new(
        &self,
        state: &mut FileState,
        incoming: u64,
    ) -> Result<(), crate::Error> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| self.sink_error(e))?;
        }

        match fs::metadata(&self.path) {
            // Rotation applies retention itself
            Ok(meta) if self.policy.needs_rotation(meta.len(), incoming) => {
                return self.rotate_locked(state);
            }
            Ok(meta) => {
                let file = OpenOptions::new()
                    .append(true)
                    .open(&self.path)
                    .map_err(|e| self.sink_error(e))?;
                internal::debug(
                    "SINK",
                    &format!("Resumed {} at {} bytes", self.path.display(), meta.len()),
                );
                state.file = Some(file);
                state.size = meta.len();
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => self.open_new(state)?,
            Err(e) => return Err(self.sink_error(e)),
        }

        // Backups left by an earlier run expire even if this run never rotates
        self.apply_retention();
        Ok(())
    }

    fn open_new(&self, state: &mut FileState) -> Result<(), crate::Error> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)
            .map_err(|e| self.sink_error(e))?;
        state.file = Some(file);
        state.size = 0;
        Ok(())
    }

    fn rotate_locked(&self, state: &mut FileState) -> Result<(), crate::Error> {
        // Dropping the handle closes the file before the rename
        state.file = None;

        if self.path.exists() {
            let backup = self.next_backup_path(state);
            fs::rename(&self.path, &backup).map_err(|e| self.sink_error(e))?;
            internal::info(
                "SINK",
                &format!("Rotated {} to {}", self.path.display(), backup.display()),
            );
        }

        self.open_new(state)?;
        self.apply_retention();
        Ok(())
    }

    fn next_backup_path(&self, state: &mut FileState) -> PathBuf {
        let now = Utc::now();
        let mut at = DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now);
        if let Some(last) = state.last_backup
            && at <= last
        {
            at = last + TimeDelta::milliseconds(1);
        }

        loop {
            let candidate = backup_path(&self.path, at);
            let mut gz = candidate.as_os_str().to_owned();
            gz.push(".gz");
            if !candidate.exists() && !Path::new(&gz).exists() {
                state.last_backup = Some(at);
                return candidate;
            }
            at += TimeDelta::milliseconds(1);
        }
    }

    /// Retention problems never fail the write that triggered them.
    fn apply_retention(&self) {
        match retention::prune(&self.path, &self.policy, Utc::now()) {
            Ok(result) => {
                for (path, reason) in &result.failed {
                    internal::warn(
                        "RETENTION",
                        &format!("Could not process {}: {reason}", path.display()),
                    );
                }
            }
            Err(e) => internal::warn("RETENTION", &format!("Pruning failed: {e}")),
        }
    }
}

impl Sink for RotatingFile {
    fn write_record(&self, bytes: &[u8]) -> Result<(), crate::Error> {
        self.write(bytes)
    }

    fn flush(&self) -> Result<(), crate::Error> {
        let mut state = self.lock();
        if let Some(file) = state.file.as_mut() {
            file.flush().map_err(|e| self.sink_error(e))?;
        }
        Ok(())
    }
}

impl Drop for RotatingFile {
    fn drop(&mut self) {
        let state = self.state.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(file) = state.file.take() {
            let _ = file.sync_all();
        }
    }
}
