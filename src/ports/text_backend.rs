//! Text generation backend port.

use crate::domain::BackendError;

/// One generation call's parameters. The engine renders the structured
/// composition request into `prompt` before it reaches an adapter; the
/// adapter owns the wire protocol.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    /// Sampling temperature, already clamped into [0, 2] upstream.
    pub temperature: f32,
}

/// Port for text generation. One call per logical operation (compose,
/// derive-style-suffix, generate-subjects); any retry policy lives inside
/// the adapter, never in the pipelines.
pub trait TextGenBackend: Send + Sync {
    fn generate(&self, request: &GenerationRequest) -> Result<String, BackendError>;
}
