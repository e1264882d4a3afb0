//! HTTP text generation backend adapter using reqwest.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};

use crate::domain::{BackendConfig, BackendError};
use crate::ports::{GenerationRequest, TextGenBackend};

/// Environment variable holding the optional API key.
pub const API_KEY_ENV: &str = "SHOTWRIGHT_API_KEY";

/// Blocking HTTP client for a text generation endpoint.
///
/// Owns the wire protocol and the retry policy; the composition pipelines
/// above it issue exactly one logical call per operation.
#[derive(Clone)]
pub struct HttpTextGenClient {
    api_key: Option<String>,
    api_url: String,
    model: String,
    max_retries: u32,
    retry_delay_ms: u64,
    client: Client,
}

impl std::fmt::Debug for HttpTextGenClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTextGenClient")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("max_retries", &self.max_retries)
            .field("retry_delay_ms", &self.retry_delay_ms)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl HttpTextGenClient {
    /// Client with the caller-specified timeout and retry settings.
    pub fn new(config: &BackendConfig, api_key: Option<String>) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| BackendError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_key,
            api_url: config.api_url.to_string(),
            model: config.model.clone(),
            max_retries: config.max_retries,
            retry_delay_ms: config.retry_delay_ms,
            client,
        })
    }

    /// Client reading the API key from `SHOTWRIGHT_API_KEY` when set.
    pub fn from_env(config: &BackendConfig) -> Result<Self, BackendError> {
        Self::new(config, std::env::var(API_KEY_ENV).ok())
    }
}

#[derive(Debug, Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    results: Vec<ApiResult>,
}

#[derive(Debug, Deserialize)]
struct ApiResult {
    #[serde(default)]
    text: String,
}

impl TextGenBackend for HttpTextGenClient {
    fn generate(&self, request: &GenerationRequest) -> Result<String, BackendError> {
        let api_request = ApiRequest {
            model: &self.model,
            prompt: &request.prompt,
            temperature: request.temperature,
        };

        let mut last_error = None;
        let max_attempts = self.max_retries.max(1);

        for attempt in 0..max_attempts {
            if attempt > 0 {
                // Exponential backoff: base * 2^(attempt-1)
                let delay = self.retry_delay_ms * 2_u64.pow(attempt.saturating_sub(1));
                std::thread::sleep(Duration::from_millis(delay));
            }

            match self.send_request(&api_request) {
                Ok(text) => return Ok(text),
                Err(e) => {
                    if e.is_retryable() {
                        last_error = Some(e);
                        continue;
                    }
                    return Err(e);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| BackendError::Transport("request failed after all retries".into())))
    }
}

impl HttpTextGenClient {
    fn send_request(&self, request: &ApiRequest<'_>) -> Result<String, BackendError> {
        let mut builder = self
            .client
            .post(&self.api_url)
            .header(CONTENT_TYPE, "application/json")
            .json(request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response =
            builder.send().map_err(|e| BackendError::Transport(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_else(|_| "unknown error".to_string());
            return Err(BackendError::Api { status: status.as_u16(), body });
        }

        let api_response: ApiResponse =
            response.json().map_err(|e| BackendError::InvalidResponse(e.to_string()))?;

        let text = api_response
            .text
            .filter(|t| !t.trim().is_empty())
            .or_else(|| {
                api_response
                    .results
                    .into_iter()
                    .map(|r| r.text)
                    .find(|t| !t.trim().is_empty())
            })
            .ok_or(BackendError::EmptyResponse)?;

        Ok(text)
    }
}
