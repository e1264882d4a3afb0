//! In-memory prompt log sink.

use std::sync::Mutex;

use chrono::{Duration, Utc};

use crate::domain::{PersistenceError, PromptLogEntry};
use crate::ports::PromptLogSink;

#[derive(Debug, Default)]
pub struct MemoryPromptLog {
    entries: Mutex<Vec<PromptLogEntry>>,
}

impl MemoryPromptLog {
    pub fn len(&self) -> usize {
        self.entries.lock().expect("entries lock").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PromptLogSink for MemoryPromptLog {
    fn write(&self, entry: &PromptLogEntry) -> Result<(), PersistenceError> {
        self.entries.lock().expect("entries lock").push(entry.clone());
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<PromptLogEntry>, PersistenceError> {
        Ok(self.entries.lock().expect("entries lock").clone())
    }

    fn read_recent(&self, window: Duration) -> Result<Vec<PromptLogEntry>, PersistenceError> {
        let cutoff = Utc::now() - window;
        let mut recent: Vec<PromptLogEntry> = self
            .read_all()?
            .into_iter()
            .filter(|entry| entry.recorded_at().is_some_and(|at| at >= cutoff))
            .collect();
        recent.reverse();
        Ok(recent)
    }
}
