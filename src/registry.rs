//! Owner of the process's two loggers.
//!
//! Each channel has a slot that moves `Unconstructed → Constructing → Ready`.
//! The first `get_logger` for a channel constructs under the slot's mutex;
//! racing callers block on that mutex and then pick up the same `Arc`. A failed
//! construction leaves the slot empty so a corrected config can retry. Once a
//! slot is ready, the config passed by later callers is ignored.

use crate::internal;
use crate::logger::{Logger, LoggerKind, LoggingConfig};
use crate::sink::{Sink, StdoutSink};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock, PoisonError, TryLockError};

/// Lifecycle of one channel's logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Unconstructed,
    Constructing,
    Ready,
}

#[derive(Default)]
struct Slot {
    ready: OnceLock<Arc<Logger>>,
    /// Held for the whole construction; never held once `ready` is set.
    constructing: Mutex<()>,
}

impl Slot {
    fn state(&self) -> SlotState {
        if self.ready.get().is_some() {
            return SlotState::Ready;
        }
        match self.constructing.try_lock() {
            Err(TryLockError::WouldBlock) => SlotState::Constructing,
            Ok(_) | Err(TryLockError::Poisoned(_)) => {
                if self.ready.get().is_some() {
                    SlotState::Ready
                } else {
                    SlotState::Unconstructed
                }
            }
        }
    }
}

type MirrorFactory = dyn Fn(LoggerKind) -> Box<dyn Sink> + Send + Sync;

pub struct LoggerRegistry {
    system: Slot,
    access: Slot,
    mirror: Box<MirrorFactory>,
    constructions: AtomicUsize,
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggerRegistry {
    /// Loggers mirror every record to stdout.
    #[must_use]
    pub fn new() -> Self {
        Self::with_mirror(|_| Box::new(StdoutSink))
    }

    /// Loggers mirror to the sink `mirror` returns for their channel instead of stdout.
    #[must_use]
    pub fn with_mirror(
        mirror: impl Fn(LoggerKind) -> Box<dyn Sink> + Send + Sync + 'static,
    ) -> Self {
        Self {
            system: Slot::default(),
            access: Slot::default(),
            mirror: Box::new(mirror),
            constructions: AtomicUsize::new(0),
        }
    }

    /// Process-wide registry, created on first use and never torn down.
    pub fn global() -> &'static Self {
        static GLOBAL: OnceLock<LoggerRegistry> = OnceLock::new();
        GLOBAL.get_or_init(Self::new)
    }

    const fn slot(&self, kind: LoggerKind) -> &Slot {
        match kind {
            LoggerKind::System => &self.system,
            LoggerKind::Access => &self.access,
        }
    }

    /// Returns the logger for `config`'s channel, constructing it on first use.
    ///
    /// # Errors
    /// `LoggerType` for an unknown selector and `Config` for an empty file path.
    /// Either way the slot stays `Unconstructed`.
    pub fn get_logger(&self, config: &LoggingConfig) -> Result<Arc<Logger>, crate::Error> {
        let kind = config.kind()?;
        let slot = self.slot(kind);

        if let Some(logger) = slot.ready.get() {
            return Ok(Arc::clone(logger));
        }

        let _guard = slot
            .constructing
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // Another caller may have finished while we waited
        if let Some(logger) = slot.ready.get() {
            return Ok(Arc::clone(logger));
        }

        let logger = Arc::new(Logger::from_config(kind, config, (self.mirror)(kind))?);
        self.constructions.fetch_add(1, Ordering::SeqCst);
        internal::debug(
            "REGISTRY",
            &format!(
                "Constructed {kind} logger: file={}, format={}, level={}",
                logger.file_path().display(),
                config.format(),
                config.level()
            ),
        );

        // Cannot fail: `ready` is only set while holding the guard
        let _ = slot.ready.set(Arc::clone(&logger));
        Ok(logger)
    }

    /// The channel's logger if it has been constructed.
    #[must_use]
    pub fn get(&self, kind: LoggerKind) -> Option<Arc<Logger>> {
        self.slot(kind).ready.get().cloned()
    }

    #[must_use]
    pub fn system(&self) -> Option<Arc<Logger>> {
        self.get(LoggerKind::System)
    }

    #[must_use]
    pub fn access(&self) -> Option<Arc<Logger>> {
        self.get(LoggerKind::Access)
    }

    #[must_use]
    pub fn state(&self, kind: LoggerKind) -> SlotState {
        self.slot(kind).state()
    }

    /// Successful constructions over the registry's lifetime; at most two.
    #[must_use]
    pub fn constructions(&self) -> usize {
        self.constructions.load(Ordering::SeqCst)
    }

    /// Flushes and closes both loggers' sinks. Best effort: every constructed
    /// logger is attempted and the first error is returned.
    ///
    /// # Errors
    /// The first flush or close failure.
    pub fn shutdown(&self) -> Result<(), crate::Error> {
        let mut first_error = None;
        for kind in LoggerKind::all() {
            if let Some(logger) = self.get(kind)
                && let Err(e) = logger.close()
            {
                internal::warn("REGISTRY", &format!("Closing {kind} logger failed: {e}"));
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

impl fmt::Debug for LoggerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerRegistry")
            .field("system", &self.state(LoggerKind::System))
            .field("access", &self.state(LoggerKind::Access))
            .field("constructions", &self.constructions())
            .finish_non_exhaustive()
    }
}
