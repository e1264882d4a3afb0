//! shotwright: a stateful prompt-composition engine for screen-to-image
//! workflows.
//!
//! A screenwriter attaches reusable subjects (characters, locations,
//! objects), a visual style, camera parameters, and free-text notes to a
//! shot; the engine assembles these into three prompts of increasing length
//! via a text generation backend, with undo/redo over every edit and
//! persisted registries of subjects, styles, and templates.
//!
//! Any UI or CLI is an external caller that maps user actions onto
//! [`Engine`] operations; this crate owns no windows, ports, or flags.

pub mod domain;
pub mod engine;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use domain::{
    BackendError, ComposedPrompts, Composition, CompositionSnapshot, DirectorStyle,
    DirectorStyleRegistry, EngineConfig, EngineError, LengthTargets, PersistenceError,
    PromptGenerationError, PromptLogEntry, PromptRequest, Registry, RegistryError, ScriptAnalysis,
    ScriptAnalysisError, Style, StyleRegistry, Subject, SubjectCategory, SubjectRegistry,
    Template, TemplateRegistry, analyze_script, concise_from_detailed, normal_from_detailed,
};
pub use engine::Engine;
pub use ports::{DurableStore, GenerationRequest, PromptLogSink, TextGenBackend};
pub use services::{HttpTextGenClient, JsonFileStore, JsonlPromptLog, PromptComposer};
