pub mod composition;
pub mod config;
pub mod error;
pub mod prompt;
pub mod prompt_log;
pub mod registry;
pub mod script_analysis;
pub mod style;
pub mod subject;
pub mod template;

pub use composition::{Composition, CompositionSnapshot, DEFAULT_HISTORY_CAPACITY};
pub use config::{BackendConfig, EngineConfig, HistoryConfig, StorageConfig};
pub use error::{
    BackendError, EngineError, PersistenceError, PromptGenerationError, RegistryError,
    ScriptAnalysisError,
};
pub use prompt::{
    ComposedPrompts, DEFAULT_SHOT_DESCRIPTION, LengthTargets, NO_ACTIVE_SUBJECTS,
    PARAGRAPH_SPLIT_ERROR, PromptRequest, concise_from_detailed, format_subject_block,
    normal_from_detailed, render_request, split_paragraphs,
};
pub use prompt_log::PromptLogEntry;
pub use registry::{
    DirectorStyleRegistry, Registry, RegistryItem, StyleRegistry, SubjectRegistry,
    TemplateRegistry,
};
pub use script_analysis::{
    SceneAnalysis, ScriptAnalysis, ShotKind, ShotSuggestion, analyze_script,
};
pub use style::{DirectorStyle, Style};
pub use subject::{Subject, SubjectCategory, parse_subject_blocks};
pub use template::Template;
