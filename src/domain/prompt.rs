//! Prompt request modelling: the structured composition inputs sent to the
//! backend, their rendering into prompt text, and the deterministic
//! paragraph-splitting and length-derivation rules for the three variants.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use minijinja::{Environment, UndefinedBehavior};
use serde::{Deserialize, Serialize};

use crate::domain::composition::CompositionSnapshot;
use crate::domain::error::PromptGenerationError;
use crate::domain::subject::Subject;

/// Sentinel used when the shot description is empty; generation always
/// proceeds with some content.
pub const DEFAULT_SHOT_DESCRIPTION: &str = "Default shot";

/// Literal marker embedded when no subjects are active, so the backend
/// never sees an ambiguous empty section.
pub const NO_ACTIVE_SUBJECTS: &str = "No active subjects";

/// Marker attached to an `Unsplit` result when the backend response did not
/// split into exactly three paragraphs.
pub const PARAGRAPH_SPLIT_ERROR: &str = "response did not split into three paragraphs";

/// Log map keys for the three variants and the fallback shape.
pub const VARIANT_CONCISE: &str = "Concise";
pub const VARIANT_NORMAL: &str = "Normal";
pub const VARIANT_DETAILED: &str = "Detailed";
pub const VARIANT_FULL_TEXT: &str = "Full Text";
pub const VARIANT_ERROR: &str = "Error";

/// Target word counts for the three requested paragraphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthTargets {
    pub concise: usize,
    pub normal: usize,
    pub detailed: usize,
}

impl Default for LengthTargets {
    fn default() -> Self {
        Self { concise: 20, normal: 50, detailed: 100 }
    }
}

/// The composition inputs actually sent to the backend for one assembly.
///
/// Logged verbatim with every successful composition, so it records which
/// subjects were active and whether the script was included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptRequest {
    pub style_prefix: String,
    pub style_suffix: String,
    pub shot_description: String,
    pub directors_notes: String,
    pub highlighted_text: String,
    /// Full script when `stick_to_script` was set, explicitly blank otherwise.
    pub script: String,
    pub subject_block: String,
    pub end_parameters: String,
    pub camera_shot: String,
    pub camera_move: String,
    pub temperature: f32,
    pub targets: LengthTargets,
}

impl PromptRequest {
    /// Build the structured request from a snapshot and the active subjects.
    pub fn from_snapshot(
        snapshot: &CompositionSnapshot,
        active_subjects: &[Subject],
        targets: LengthTargets,
    ) -> Self {
        let shot_description = if snapshot.shot_description.trim().is_empty() {
            DEFAULT_SHOT_DESCRIPTION.to_string()
        } else {
            snapshot.shot_description.clone()
        };
        let script =
            if snapshot.stick_to_script { snapshot.script.clone() } else { String::new() };

        Self {
            style_prefix: snapshot.style_prefix.clone(),
            style_suffix: snapshot.style_suffix.clone(),
            shot_description,
            directors_notes: snapshot.directors_notes.clone(),
            highlighted_text: snapshot.highlighted_text.clone(),
            script,
            subject_block: format_subject_block(active_subjects),
            end_parameters: snapshot.end_parameters.clone(),
            camera_shot: snapshot.camera_shot.clone(),
            camera_move: snapshot.camera_move.clone(),
            temperature: snapshot.temperature,
            targets,
        }
    }
}

/// One line per subject, `"name (category): description"`. An empty list
/// formats to the explicit `"No active subjects"` marker.
pub fn format_subject_block(subjects: &[Subject]) -> String {
    if subjects.is_empty() {
        return NO_ACTIVE_SUBJECTS.to_string();
    }
    subjects
        .iter()
        .map(|s| format!("{} ({}): {}", s.name, s.category, s.description))
        .collect::<Vec<_>>()
        .join("\n")
}

const REQUEST_TEMPLATE: &str = "\
You are writing prompts for an AI image generator.

Style: {{ style_prefix }} {{ style_suffix }}
Shot description: {{ shot_description }}
Director's notes: {{ directors_notes }}
Highlighted excerpt: {{ highlighted_text }}
Script:
{{ script }}
Subjects:
{{ subject_block }}
End parameters: {{ end_parameters }}
Camera shot: {{ camera_shot }}
Camera move: {{ camera_move }}

Write exactly three paragraphs separated by blank lines: a concise prompt of \
about {{ targets.concise }} words, a normal prompt of about {{ targets.normal }} \
words, and a detailed prompt of about {{ targets.detailed }} words. Describe \
only what is present in the frame and phrase everything positively.";

static ENV: OnceLock<Environment<'static>> = OnceLock::new();

/// Render the structured request into the backend prompt text.
///
/// Strict interpolation-only rendering: every placeholder must resolve.
pub fn render_request(request: &PromptRequest) -> Result<String, PromptGenerationError> {
    let env = ENV.get_or_init(|| {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env
    });

    env.render_str(REQUEST_TEMPLATE, request)
        .map_err(|err| PromptGenerationError::Template(err.to_string()))
}

/// The three-tier artifact of one composition, or the flagged fallback when
/// the backend did not honor the three-paragraph instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum ComposedPrompts {
    Variants { concise: String, normal: String, detailed: String },
    /// Best-effort combined text plus an explicit error marker; paragraph
    /// boundaries are never guessed and content is never discarded.
    Unsplit { full_text: String, error: String },
}

impl ComposedPrompts {
    /// Interpret a backend response by its blank-line paragraph boundaries.
    pub fn from_response(text: &str) -> Self {
        let mut paragraphs = split_paragraphs(text);
        if paragraphs.len() == 3 {
            let detailed = paragraphs.pop().unwrap_or_default();
            let normal = paragraphs.pop().unwrap_or_default();
            let concise = paragraphs.pop().unwrap_or_default();
            ComposedPrompts::Variants { concise, normal, detailed }
        } else {
            ComposedPrompts::Unsplit {
                full_text: paragraphs.join("\n\n"),
                error: PARAGRAPH_SPLIT_ERROR.to_string(),
            }
        }
    }

    /// Variant-name-to-text map recorded in the prompt log.
    pub fn as_log_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        match self {
            ComposedPrompts::Variants { concise, normal, detailed } => {
                map.insert(VARIANT_CONCISE.to_string(), concise.clone());
                map.insert(VARIANT_NORMAL.to_string(), normal.clone());
                map.insert(VARIANT_DETAILED.to_string(), detailed.clone());
            }
            ComposedPrompts::Unsplit { full_text, error } => {
                map.insert(VARIANT_FULL_TEXT.to_string(), full_text.clone());
                map.insert(VARIANT_ERROR.to_string(), error.clone());
            }
        }
        map
    }
}

/// Split text into paragraphs at blank-line boundaries (whitespace-only
/// lines count as blank). Paragraphs keep their internal line breaks.
pub fn split_paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line.trim_end());
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join("\n"));
    }

    paragraphs
}

/// Downgrade a detailed prompt to a concise one without a backend call:
/// the text before the first period, or the first 100 characters with an
/// ellipsis, whichever is shorter.
pub fn concise_from_detailed(detailed: &str) -> String {
    derive_short_form(detailed, Some('.'), 100)
}

/// Downgrade a detailed prompt to a normal one: the first blank-line
/// paragraph, or the first 250 characters with an ellipsis.
pub fn normal_from_detailed(detailed: &str) -> String {
    let first_paragraph = split_paragraphs(detailed).into_iter().next().unwrap_or_default();
    if first_paragraph.chars().count() <= 250 {
        first_paragraph
    } else {
        truncate_chars(&first_paragraph, 250)
    }
}

fn derive_short_form(text: &str, boundary: Option<char>, limit: usize) -> String {
    if let Some(boundary) = boundary
        && let Some(index) = text.find(boundary)
        && text[..index].chars().count() <= limit
    {
        return text[..index].to_string();
    }
    if text.chars().count() <= limit {
        return text.to_string();
    }
    truncate_chars(text, limit)
}

fn truncate_chars(text: &str, limit: usize) -> String {
    let mut truncated: String = text.chars().take(limit).collect();
    truncated.push_str("...");
    truncated
}
