//! Shared integration-test helpers: a scripted backend and engine setup
//! over a temporary storage root.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use shotwright::{BackendError, Engine, EngineConfig, GenerationRequest, TextGenBackend};
use tempfile::TempDir;

/// Backend that replays queued responses and records requests.
#[derive(Debug, Default)]
pub struct ScriptedBackend {
    responses: Mutex<VecDeque<Result<String, BackendError>>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedBackend {
    pub fn respond_with(text: &str) -> Arc<Self> {
        let backend = Arc::new(Self::default());
        backend.push(Ok(text.to_string()));
        backend
    }

    pub fn push(&self, result: Result<String, BackendError>) {
        self.responses.lock().unwrap().push_back(result);
    }

    #[allow(dead_code)]
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl TextGenBackend for ScriptedBackend {
    fn generate(&self, request: &GenerationRequest) -> Result<String, BackendError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(BackendError::Transport("script exhausted".into())))
    }
}

/// Engine over a temp storage root; the `TempDir` guard must stay alive for
/// the duration of the test.
pub fn engine_at(root: &TempDir, backend: Arc<ScriptedBackend>) -> Engine {
    Engine::open(&config_at(root), backend).expect("engine opens over empty storage root")
}

pub fn config_at(root: &TempDir) -> EngineConfig {
    let mut config = EngineConfig::default();
    config.storage.root = root.path().to_path_buf();
    config
}
