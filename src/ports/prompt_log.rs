//! Prompt log sink port.

use chrono::Duration;

use crate::domain::{PersistenceError, PromptLogEntry};

/// Append-only sink for assembly invocations.
pub trait PromptLogSink: Send + Sync {
    /// Append one entry. Never rewrites earlier entries.
    fn write(&self, entry: &PromptLogEntry) -> Result<(), PersistenceError>;

    /// Every entry, in append order.
    fn read_all(&self) -> Result<Vec<PromptLogEntry>, PersistenceError>;

    /// Entries recorded within the window, most-recent-first.
    fn read_recent(&self, window: Duration) -> Result<Vec<PromptLogEntry>, PersistenceError>;
}
