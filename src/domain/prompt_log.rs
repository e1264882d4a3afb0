//! Append-only record of every prompt assembly invocation.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::prompt::PromptRequest;

/// One assembly invocation: the inputs actually sent, the variant texts
/// returned, and when it happened. Entries are never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptLogEntry {
    /// ISO-8601 / RFC 3339 timestamp, UTC.
    pub timestamp: String,
    pub request: PromptRequest,
    /// Variant name ("Concise"/"Normal"/"Detailed", or "Full Text" plus
    /// "Error" on the paragraph-split fallback) to generated text.
    pub response: BTreeMap<String, String>,
}

impl PromptLogEntry {
    /// Entry timestamped now.
    pub fn new(request: PromptRequest, response: BTreeMap<String, String>) -> Self {
        Self::at(Utc::now(), request, response)
    }

    /// Entry with an explicit timestamp (tests, replays).
    pub fn at(
        timestamp: DateTime<Utc>,
        request: PromptRequest,
        response: BTreeMap<String, String>,
    ) -> Self {
        Self { timestamp: timestamp.to_rfc3339(), request, response }
    }

    /// Parsed timestamp; `None` when the stored string is unreadable.
    pub fn recorded_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp).ok().map(|t| t.with_timezone(&Utc))
    }
}
