mod prompt_log;
mod store;
mod text_backend;

pub use prompt_log::PromptLogSink;
pub use store::DurableStore;
pub use text_backend::{GenerationRequest, TextGenBackend};
