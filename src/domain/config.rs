//! Engine configuration, loaded from a TOML file with per-field defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use url::Url;

use crate::domain::composition::DEFAULT_HISTORY_CAPACITY;
use crate::domain::error::EngineError;

/// Top-level configuration. Every section and field is optional in the
/// file; absent values take the defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl EngineConfig {
    /// Read and parse a TOML config file.
    pub fn from_path(path: &Path) -> Result<Self, EngineError> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}

/// Text generation backend endpoint settings.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Backend endpoint URL.
    #[serde(default = "default_api_url")]
    pub api_url: Url,
    /// Model identifier forwarded to the backend.
    #[serde(default = "default_model")]
    pub model: String,
    /// Request timeout in seconds; bounds the only unbounded-latency call.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Maximum attempts per generation (adapter-level retry policy).
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Delay between retries in milliseconds.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            model: default_model(),
            timeout_secs: default_timeout(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

fn default_api_url() -> Url {
    Url::parse("http://127.0.0.1:5000/api/v1/generate").expect("default API URL is valid")
}

fn default_model() -> String {
    "default".to_string()
}

fn default_timeout() -> u64 {
    120
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1000
}

/// Undo/redo history bounds.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryConfig {
    /// Per-stack snapshot bound; oldest entries are evicted past it.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { capacity: default_capacity() }
    }
}

fn default_capacity() -> usize {
    DEFAULT_HISTORY_CAPACITY
}

/// Where registries and the prompt log live on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_root")]
    pub root: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { root: default_root() }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".shotwright")
}
