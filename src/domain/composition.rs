//! The live composition: the "current shot" under edit, with a linear
//! undo/redo history over immutable snapshots.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::domain::subject::Subject;
use crate::domain::template::{Template, fields};

/// Default bound on each history stack. Configurable per composition.
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// An immutable record of every user input for one shot.
///
/// `subjects` is an owned value copy taken at snapshot time; mutating the
/// live subject selection later never alters a stored snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionSnapshot {
    pub shot_description: String,
    pub directors_notes: String,
    pub script: String,
    pub highlighted_text: String,
    pub stick_to_script: bool,
    pub style_prefix: String,
    pub style_suffix: String,
    pub end_parameters: String,
    pub subjects: Vec<Subject>,
    pub camera_shot: String,
    pub camera_move: String,
    pub temperature: f32,
}

impl Default for CompositionSnapshot {
    fn default() -> Self {
        Self {
            shot_description: String::new(),
            directors_notes: String::new(),
            script: String::new(),
            highlighted_text: String::new(),
            stick_to_script: false,
            style_prefix: String::new(),
            style_suffix: String::new(),
            end_parameters: String::new(),
            subjects: Vec::new(),
            camera_shot: String::new(),
            camera_move: String::new(),
            temperature: 0.7,
        }
    }
}

/// Mutable composition state plus its bounded undo/redo stacks.
///
/// Not safe for concurrent mutation; callers serialize access (one instance
/// per user session). Undo and redo never fail: at a history boundary they
/// leave the current snapshot unchanged.
#[derive(Debug)]
pub struct Composition {
    current: CompositionSnapshot,
    past: VecDeque<CompositionSnapshot>,
    future: VecDeque<CompositionSnapshot>,
    capacity: usize,
}

impl Default for Composition {
    fn default() -> Self {
        Self::new()
    }
}

impl Composition {
    /// All-default current snapshot, empty history.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    /// As `new`, with a custom per-stack history bound (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            current: CompositionSnapshot::default(),
            past: VecDeque::new(),
            future: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn current(&self) -> &CompositionSnapshot {
        &self.current
    }

    /// Owned copy of the current snapshot, for the assembly pipeline.
    pub fn snapshot(&self) -> CompositionSnapshot {
        self.current.clone()
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Record the current snapshot and mutate in place.
    ///
    /// Any new edit invalidates a previously-undone branch, so the redo
    /// stack is cleared on every apply (linear history, no branching).
    /// Applying to an all-default composition is a valid transition.
    pub fn apply(&mut self, mutate: impl FnOnce(&mut CompositionSnapshot)) {
        self.past.push_back(self.current.clone());
        if self.past.len() > self.capacity {
            self.past.pop_front();
        }
        self.future.clear();
        mutate(&mut self.current);
    }

    /// Step back one edit. No-op when the past stack is empty.
    pub fn undo(&mut self) -> &CompositionSnapshot {
        if let Some(previous) = self.past.pop_back() {
            let displaced = std::mem::replace(&mut self.current, previous);
            self.future.push_front(displaced);
            if self.future.len() > self.capacity {
                self.future.pop_back();
            }
        }
        &self.current
    }

    /// Step forward one undone edit. No-op when the future stack is empty.
    pub fn redo(&mut self) -> &CompositionSnapshot {
        if let Some(next) = self.future.pop_front() {
            let displaced = std::mem::replace(&mut self.current, next);
            self.past.push_back(displaced);
            if self.past.len() > self.capacity {
                self.past.pop_front();
            }
        }
        &self.current
    }

    /// Install a loaded snapshot and drop all history (project load).
    pub fn reset(&mut self, snapshot: CompositionSnapshot) {
        self.past.clear();
        self.future.clear();
        self.current = snapshot;
    }

    // Field mutators. Each funnels through `apply` so every edit is exactly
    // one undoable step.

    pub fn set_shot_description(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.apply(|snap| snap.shot_description = text);
    }

    pub fn set_directors_notes(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.apply(|snap| snap.directors_notes = text);
    }

    pub fn set_script(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.apply(|snap| snap.script = text);
    }

    pub fn set_highlighted_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.apply(|snap| snap.highlighted_text = text);
    }

    pub fn set_stick_to_script(&mut self, stick: bool) {
        self.apply(|snap| snap.stick_to_script = stick);
    }

    pub fn set_style(&mut self, prefix: impl Into<String>, suffix: impl Into<String>) {
        let prefix = prefix.into();
        let suffix = suffix.into();
        self.apply(|snap| {
            snap.style_prefix = prefix;
            snap.style_suffix = suffix;
        });
    }

    pub fn set_end_parameters(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.apply(|snap| snap.end_parameters = text);
    }

    /// Replace the subject selection. The list is owned by the snapshot.
    pub fn set_subjects(&mut self, subjects: Vec<Subject>) {
        self.apply(|snap| snap.subjects = subjects);
    }

    pub fn set_camera(&mut self, shot: impl Into<String>, movement: impl Into<String>) {
        let shot = shot.into();
        let movement = movement.into();
        self.apply(|snap| {
            snap.camera_shot = shot;
            snap.camera_move = movement;
        });
    }

    /// Set the sampling temperature, clamped into [0, 2].
    pub fn set_temperature(&mut self, value: f32) {
        let value = value.clamp(0.0, 2.0);
        self.apply(|snap| snap.temperature = value);
    }

    /// Pre-fill fields from a template as a single undoable edit.
    ///
    /// Only components the template actually carries are written; unset
    /// fields keep their current values. Unparsable bool/float components
    /// are skipped, matching the tolerant handling of free-form inputs.
    pub fn apply_template(&mut self, template: &Template) {
        let template = template.clone();
        self.apply(move |snap| {
            if let Some(value) = template.component(fields::SHOT_DESCRIPTION) {
                snap.shot_description = value.to_string();
            }
            if let Some(value) = template.component(fields::DIRECTORS_NOTES) {
                snap.directors_notes = value.to_string();
            }
            if let Some(value) = template.component(fields::SCRIPT) {
                snap.script = value.to_string();
            }
            if let Some(value) = template.component(fields::HIGHLIGHTED_TEXT) {
                snap.highlighted_text = value.to_string();
            }
            if let Some(parsed) =
                template.component(fields::STICK_TO_SCRIPT).and_then(|v| v.parse().ok())
            {
                snap.stick_to_script = parsed;
            }
            if let Some(value) = template.component(fields::STYLE_PREFIX) {
                snap.style_prefix = value.to_string();
            }
            if let Some(value) = template.component(fields::STYLE_SUFFIX) {
                snap.style_suffix = value.to_string();
            }
            if let Some(value) = template.component(fields::END_PARAMETERS) {
                snap.end_parameters = value.to_string();
            }
            if let Some(value) = template.component(fields::CAMERA_SHOT) {
                snap.camera_shot = value.to_string();
            }
            if let Some(value) = template.component(fields::CAMERA_MOVE) {
                snap.camera_move = value.to_string();
            }
            if let Some(parsed) =
                template.component(fields::TEMPERATURE).and_then(|v| v.parse::<f32>().ok())
            {
                snap.temperature = parsed.clamp(0.0, 2.0);
            }
        });
    }
}
