//! Outcome of one retention pass, kept structured so the CLI can report it.

use std::path::PathBuf;

#[derive(Debug, Default)]
pub struct PruneResult {
    /// Backups deleted for exceeding the count or age limit.
    pub removed: Vec<PathBuf>,
    /// `.gz` files created by this pass.
    pub compressed: Vec<PathBuf>,
    /// Backups that could not be removed or compressed, with the reason.
    pub failed: Vec<(PathBuf, String)>,
}

impl PruneResult {
    /// Nothing removed, compressed or failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.compressed.is_empty() && self.failed.is_empty()
    }
}
