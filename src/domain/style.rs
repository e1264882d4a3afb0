//! Visual styles: prefix/suffix pairs prepended and appended to prompts,
//! plus director-style profiles consumed by script analysis.

use serde::{Deserialize, Serialize};

/// A named prefix/suffix pair, keyed by name in the style registry.
///
/// The suffix may be empty until derived from the prefix via the text
/// generation backend; it is stored verbatim once generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub name: String,
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
}

impl Style {
    pub fn new(name: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self { name: name.into(), prefix: prefix.into(), suffix: String::new() }
    }
}

/// A director's visual signature, used to bias generated shot lists.
///
/// Every attribute is optional; script analysis substitutes fixed generic
/// phrases for absent ones.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DirectorStyle {
    pub name: String,
    #[serde(default)]
    pub composition: Option<String>,
    #[serde(default)]
    pub camera_angles: Option<String>,
    #[serde(default)]
    pub motifs: Option<String>,
    #[serde(default)]
    pub pacing: Option<String>,
}

impl DirectorStyle {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }
}
