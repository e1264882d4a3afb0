//! Scripted text generation backend for deterministic tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::domain::BackendError;
use crate::ports::{GenerationRequest, TextGenBackend};

/// Replays queued responses in order and records every request it saw.
#[derive(Debug, Default)]
pub struct FakeBackend {
    responses: Mutex<VecDeque<Result<String, BackendError>>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl FakeBackend {
    /// Backend that answers every call with the same text.
    pub fn with_response(text: impl Into<String>) -> Self {
        let backend = Self::default();
        backend.push_response(text);
        backend
    }

    /// Backend whose next call fails with a transport error.
    pub fn failing() -> Self {
        let backend = Self::default();
        backend.push_error(BackendError::Transport("injected backend failure".into()));
        backend
    }

    pub fn push_response(&self, text: impl Into<String>) {
        self.responses.lock().expect("responses lock").push_back(Ok(text.into()));
    }

    pub fn push_error(&self, error: BackendError) {
        self.responses.lock().expect("responses lock").push_back(Err(error));
    }

    /// Everything `generate` has been called with, in order.
    pub fn recorded_requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

impl TextGenBackend for FakeBackend {
    fn generate(&self, request: &GenerationRequest) -> Result<String, BackendError> {
        self.requests.lock().expect("requests lock").push(request.clone());
        let mut responses = self.responses.lock().expect("responses lock");
        match responses.pop_front() {
            Some(result) => {
                // A single scripted success keeps answering repeat calls.
                if responses.is_empty()
                    && let Ok(text) = &result
                {
                    responses.push_back(Ok(text.clone()));
                }
                result
            }
            None => Err(BackendError::Transport("no scripted response left".into())),
        }
    }
}
