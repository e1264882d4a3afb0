//! Deterministic script analysis: scene splitting, character extraction,
//! and a best-effort three-shot list per scene biased by a director style.
//!
//! This is the backend-free fallback generator; it never calls the text
//! generation backend.

use serde::Serialize;

use crate::domain::error::ScriptAnalysisError;
use crate::domain::prompt::split_paragraphs;
use crate::domain::style::DirectorStyle;

const GENERIC_COMPOSITION: &str = "balanced composition";
const GENERIC_CAMERA_ANGLES: &str = "eye-level camera";
const GENERIC_MOTIFS: &str = "a single clear focal point";
const GENERIC_PACING: &str = "steady pacing";

/// The three synthetic shots emitted for every scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ShotKind {
    Establishing,
    CharacterInteraction,
    Detail,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShotSuggestion {
    pub kind: ShotKind,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneAnalysis {
    /// Zero-based scene position within the script.
    pub index: usize,
    /// Speaker names found in the scene, first-seen order, deduplicated.
    pub characters: Vec<String>,
    pub shots: Vec<ShotSuggestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScriptAnalysis {
    pub scenes: Vec<SceneAnalysis>,
}

impl ScriptAnalysis {
    /// Speaker names across all scenes, first-seen order, deduplicated.
    pub fn characters(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for scene in &self.scenes {
            for name in &scene.characters {
                if !seen.contains(name) {
                    seen.push(name.clone());
                }
            }
        }
        seen
    }
}

/// Split a script into blank-line-delimited scenes and emit exactly three
/// shots per scene, populated from the director style's attributes with
/// fixed generic phrases where an attribute is absent.
pub fn analyze_script(
    script: &str,
    style: &DirectorStyle,
) -> Result<ScriptAnalysis, ScriptAnalysisError> {
    let scene_texts = split_paragraphs(script);
    if scene_texts.is_empty() {
        return Err(ScriptAnalysisError::EmptyScript);
    }

    let composition = style.composition.as_deref().unwrap_or(GENERIC_COMPOSITION);
    let camera_angles = style.camera_angles.as_deref().unwrap_or(GENERIC_CAMERA_ANGLES);
    let motifs = style.motifs.as_deref().unwrap_or(GENERIC_MOTIFS);
    let pacing = style.pacing.as_deref().unwrap_or(GENERIC_PACING);

    let scenes = scene_texts
        .iter()
        .enumerate()
        .map(|(index, text)| {
            let characters = extract_characters(text);
            let cast = if characters.is_empty() {
                "the scene's figures".to_string()
            } else {
                characters.join(", ")
            };

            let shots = vec![
                ShotSuggestion {
                    kind: ShotKind::Establishing,
                    description: format!(
                        "Establishing shot of scene {}, {composition}, {camera_angles}, {pacing}",
                        index + 1
                    ),
                },
                ShotSuggestion {
                    kind: ShotKind::CharacterInteraction,
                    description: format!("{cast} in interaction, {camera_angles}, {motifs}"),
                },
                ShotSuggestion {
                    kind: ShotKind::Detail,
                    description: format!("Detail shot emphasizing {motifs}, {pacing}"),
                },
            ];

            SceneAnalysis { index, characters, shots }
        })
        .collect();

    Ok(ScriptAnalysis { scenes })
}

/// `Name:` line-prefix heuristic: a line whose text before the first colon
/// is one to three alphabetic words reads as a speaker cue.
fn extract_characters(scene: &str) -> Vec<String> {
    let mut names = Vec::new();
    for line in scene.lines() {
        let Some((head, _)) = line.split_once(':') else {
            continue;
        };
        let head = head.trim();
        if head.is_empty() || head.split_whitespace().count() > 3 {
            continue;
        }
        if !head.split_whitespace().all(|word| word.chars().all(char::is_alphabetic)) {
            continue;
        }
        if !names.iter().any(|n| n == head) {
            names.push(head.to_string());
        }
    }
    names
}
