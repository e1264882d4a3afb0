//! Subjects: named characters, locations, and objects that can be attached
//! to a composition, plus the tolerant parser for AI-generated subject lists.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What kind of thing a subject is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SubjectCategory {
    MainCharacter,
    SupportingCharacter,
    Location,
    #[default]
    Object,
}

impl SubjectCategory {
    /// Human-readable form, used in prompts and persisted descriptions.
    pub fn as_str(&self) -> &'static str {
        match self {
            SubjectCategory::MainCharacter => "Main Character",
            SubjectCategory::SupportingCharacter => "Supporting Character",
            SubjectCategory::Location => "Location",
            SubjectCategory::Object => "Object",
        }
    }

    /// Lenient parse for free-form backend output.
    ///
    /// Case, spaces, hyphens, and underscores are ignored. Anything
    /// unrecognized falls back to `Object`.
    pub fn parse_lenient(input: &str) -> Self {
        let normalized: String = input
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "maincharacter" => SubjectCategory::MainCharacter,
            "supportingcharacter" => SubjectCategory::SupportingCharacter,
            "location" => SubjectCategory::Location,
            _ => SubjectCategory::Object,
        }
    }
}

impl fmt::Display for SubjectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reusable subject, keyed by name (case-sensitive) in its registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub name: String,
    #[serde(default)]
    pub category: SubjectCategory,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub active: bool,
}

impl Subject {
    pub fn new(
        name: impl Into<String>,
        category: SubjectCategory,
        description: impl Into<String>,
    ) -> Self {
        Self { name: name.into(), category, description: description.into(), active: false }
    }
}

/// Parse `Name:` / `Category:` / `Description:` blocks out of backend text.
///
/// Lines are scanned in order. A `Name:` line starts a new record, flushing
/// any in-progress one. Other non-empty lines extend the current record's
/// description (space-joined), so multi-line descriptions survive. Orphan
/// field lines before any `Name:` are skipped: the input is free-form
/// AI-generated text, so malformed fragments are tolerated, not raised.
pub fn parse_subject_blocks(text: &str) -> Vec<Subject> {
    let mut subjects = Vec::new();
    let mut current: Option<Subject> = None;

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(rest) = line.strip_prefix("Name:") {
            if let Some(done) = current.take() {
                subjects.push(done);
            }
            current = Some(Subject::new(rest.trim(), SubjectCategory::Object, ""));
        } else if let Some(rest) = line.strip_prefix("Category:") {
            if let Some(subject) = current.as_mut() {
                subject.category = SubjectCategory::parse_lenient(rest);
            }
        } else if let Some(rest) = line.strip_prefix("Description:") {
            if let Some(subject) = current.as_mut() {
                subject.description = rest.trim().to_string();
            }
        } else if let Some(subject) = current.as_mut() {
            if subject.description.is_empty() {
                subject.description = line.to_string();
            } else {
                subject.description.push(' ');
                subject.description.push_str(line);
            }
        }
    }

    if let Some(done) = current.take() {
        subjects.push(done);
    }

    subjects
}
