//! Filesystem prompt log: one JSON object per line, append-only.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use chrono::{Duration, Utc};

use crate::domain::{PersistenceError, PromptLogEntry};
use crate::ports::PromptLogSink;

const COLLECTION: &str = "prompt_log";

/// Append-only JSONL log file. Unreadable lines are skipped on read: the
/// log is history, not a source of truth.
#[derive(Debug, Clone)]
pub struct JsonlPromptLog {
    path: PathBuf,
}

impl JsonlPromptLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

fn io_error(source: std::io::Error) -> PersistenceError {
    PersistenceError::Io { collection: COLLECTION.to_string(), source }
}

impl PromptLogSink for JsonlPromptLog {
    fn write(&self, entry: &PromptLogEntry) -> Result<(), PersistenceError> {
        let line = serde_json::to_string(entry).map_err(|source| {
            PersistenceError::Serialization { collection: COLLECTION.to_string(), source }
        })?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(io_error)?;
        writeln!(file, "{line}").map_err(io_error)?;
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<PromptLogEntry>, PersistenceError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path).map_err(io_error)?;
        Ok(content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect())
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CompositionSnapshot, LengthTargets, PromptRequest};
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn entry_at(timestamp: chrono::DateTime<Utc>, label: &str) -> PromptLogEntry {
        let request = PromptRequest::from_snapshot(
            &CompositionSnapshot::default(),
            &[],
            LengthTargets::default(),
        );
        let mut response = BTreeMap::new();
        response.insert("Concise".to_string(), label.to_string());
        PromptLogEntry::at(timestamp, request, response)
    }

    #[test]
    fn entries_append_and_read_back_in_order() {
        let dir = TempDir::new().unwrap();
        let log = JsonlPromptLog::new(dir.path().join("prompt_log.jsonl"));

        log.write(&entry_at(Utc::now(), "first")).unwrap();
        log.write(&entry_at(Utc::now(), "second")).unwrap();

        let entries = log.read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].response["Concise"], "first");
        assert_eq!(entries[1].response["Concise"], "second");
    }

    #[test]
    fn read_recent_filters_and_orders_most_recent_first() {
        let dir = TempDir::new().unwrap();
        let log = JsonlPromptLog::new(dir.path().join("prompt_log.jsonl"));

        let now = Utc::now();
        log.write(&entry_at(now - Duration::hours(3), "old")).unwrap();
        log.write(&entry_at(now - Duration::minutes(10), "recent")).unwrap();
        log.write(&entry_at(now, "newest")).unwrap();

        let recent = log.read_recent(Duration::hours(1)).unwrap();
        let labels: Vec<&str> =
            recent.iter().map(|e| e.response["Concise"].as_str()).collect();
        assert_eq!(labels, vec!["newest", "recent"]);
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let log = JsonlPromptLog::new(dir.path().join("nothing.jsonl"));
        assert!(log.read_all().unwrap().is_empty());
    }

    #[test]
    fn corrupt_lines_are_skipped_not_fatal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prompt_log.jsonl");
        let log = JsonlPromptLog::new(&path);

        log.write(&entry_at(Utc::now(), "good")).unwrap();
        let mut file = OpenOptions::new().append(true).open(&path).unwrap();
        writeln!(file, "{{not json").unwrap();
        log.write(&entry_at(Utc::now(), "also good")).unwrap();

        assert_eq!(log.read_all().unwrap().len(), 2);
    }
}
