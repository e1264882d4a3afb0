//! Composition templates: named snapshots of a subset of composition fields,
//! used to pre-fill a new shot.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::composition::CompositionSnapshot;

/// Field names a template component may target.
pub mod fields {
    pub const SHOT_DESCRIPTION: &str = "shot_description";
    pub const DIRECTORS_NOTES: &str = "directors_notes";
    pub const SCRIPT: &str = "script";
    pub const HIGHLIGHTED_TEXT: &str = "highlighted_text";
    pub const STICK_TO_SCRIPT: &str = "stick_to_script";
    pub const STYLE_PREFIX: &str = "style_prefix";
    pub const STYLE_SUFFIX: &str = "style_suffix";
    pub const END_PARAMETERS: &str = "end_parameters";
    pub const CAMERA_SHOT: &str = "camera_shot";
    pub const CAMERA_MOVE: &str = "camera_move";
    pub const TEMPERATURE: &str = "temperature";

    /// All known field names, in the order they appear on a snapshot.
    pub const ALL: &[&str] = &[
        SHOT_DESCRIPTION,
        DIRECTORS_NOTES,
        SCRIPT,
        HIGHLIGHTED_TEXT,
        STICK_TO_SCRIPT,
        STYLE_PREFIX,
        STYLE_SUFFIX,
        END_PARAMETERS,
        CAMERA_SHOT,
        CAMERA_MOVE,
        TEMPERATURE,
    ];
}

/// A named mapping from field name to value, keyed by name in the template
/// registry.
///
/// Fields absent from `components` are *unset*: `component` returns `None`
/// and loaders must leave the target field alone rather than substitute an
/// empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub name: String,
    #[serde(default)]
    pub components: BTreeMap<String, String>,
}

impl Template {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), components: BTreeMap::new() }
    }

    /// Capture the named fields of a snapshot into a new template.
    ///
    /// Unknown field names are skipped.
    pub fn from_snapshot(
        name: impl Into<String>,
        snapshot: &CompositionSnapshot,
        field_names: &[&str],
    ) -> Self {
        let mut template = Self::new(name);
        for field in field_names {
            if let Some(value) = snapshot_field(snapshot, field) {
                template.components.insert((*field).to_string(), value);
            }
        }
        template
    }

    /// Value for a field, or `None` if the template leaves it unset.
    pub fn component(&self, field: &str) -> Option<&str> {
        self.components.get(field).map(String::as_str)
    }

    pub fn set_component(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.components.insert(field.into(), value.into());
    }
}

fn snapshot_field(snapshot: &CompositionSnapshot, field: &str) -> Option<String> {
    match field {
        fields::SHOT_DESCRIPTION => Some(snapshot.shot_description.clone()),
        fields::DIRECTORS_NOTES => Some(snapshot.directors_notes.clone()),
        fields::SCRIPT => Some(snapshot.script.clone()),
        fields::HIGHLIGHTED_TEXT => Some(snapshot.highlighted_text.clone()),
        fields::STICK_TO_SCRIPT => Some(snapshot.stick_to_script.to_string()),
        fields::STYLE_PREFIX => Some(snapshot.style_prefix.clone()),
        fields::STYLE_SUFFIX => Some(snapshot.style_suffix.clone()),
        fields::END_PARAMETERS => Some(snapshot.end_parameters.clone()),
        fields::CAMERA_SHOT => Some(snapshot.camera_shot.clone()),
        fields::CAMERA_MOVE => Some(snapshot.camera_move.clone()),
        fields::TEMPERATURE => Some(snapshot.temperature.to_string()),
        _ => None,
    }
}
