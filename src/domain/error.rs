use std::io;

use thiserror::Error;

/// Durable-store failure while reading or writing a collection.
///
/// Save failures always propagate to the caller; a registry never commits an
/// in-memory change that did not reach the store.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Underlying I/O failure for a collection file.
    #[error("I/O failure for collection '{collection}': {source}")]
    Io {
        collection: String,
        #[source]
        source: io::Error,
    },

    /// Records could not be encoded or decoded.
    #[error("serialization failure for collection '{collection}': {source}")]
    Serialization {
        collection: String,
        #[source]
        source: serde_json::Error,
    },

    /// Collection name would escape the storage root.
    #[error("invalid collection name '{0}': must be alphanumeric with hyphens or underscores")]
    InvalidCollection(String),
}

/// Registry contract violation or a persistence failure during a mutation.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// An item with this key already exists.
    #[error("'{0}' already exists")]
    DuplicateKey(String),

    /// No item with this key.
    #[error("'{0}' not found")]
    NotFound(String),

    /// The mutation could not be persisted; the registry is unchanged.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Text generation backend failure, produced by backend adapters.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Backend client could not be constructed.
    #[error("backend configuration error: {0}")]
    Config(String),

    /// Request never produced an HTTP response (connect, timeout, ...).
    #[error("backend request failed: {0}")]
    Transport(String),

    /// Backend answered with a non-success status.
    #[error("backend returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// Response body could not be decoded.
    #[error("backend response could not be decoded: {0}")]
    InvalidResponse(String),

    /// Response decoded but carried no generated text.
    #[error("backend response contained no generated text")]
    EmptyResponse,
}

impl BackendError {
    /// Whether a retry at the adapter level may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            BackendError::Transport(_) => true,
            BackendError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Prompt assembly or style-suffix derivation failure.
///
/// Composition state and the prompt log are never left partially mutated:
/// the log entry is written only after the backend call fully resolves.
#[derive(Debug, Error)]
pub enum PromptGenerationError {
    /// The single backend call of the pipeline failed.
    #[error("text generation failed: {0}")]
    Backend(#[from] BackendError),

    /// The structured request could not be rendered to prompt text.
    #[error("prompt template rendering failed: {0}")]
    Template(String),

    /// Generation succeeded but the log entry could not be recorded.
    #[error("prompt log write failed: {0}")]
    Log(#[from] PersistenceError),
}

/// Script analysis or subject-generation failure.
#[derive(Debug, Error)]
pub enum ScriptAnalysisError {
    /// Subject generation's backend call failed.
    #[error("text generation failed: {0}")]
    Backend(#[from] BackendError),

    /// The script contains no scenes to analyze.
    #[error("script is empty")]
    EmptyScript,
}

/// Aggregate error for the engine facade.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    PromptGeneration(#[from] PromptGenerationError),

    #[error(transparent)]
    ScriptAnalysis(#[from] ScriptAnalysisError),

    /// Configuration file could not be read.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration file could not be parsed.
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}
