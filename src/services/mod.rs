mod composer;
mod http_backend;
mod json_store;
mod jsonl_log;

pub use composer::PromptComposer;
pub use http_backend::{API_KEY_ENV, HttpTextGenClient};
pub use json_store::JsonFileStore;
pub use jsonl_log::JsonlPromptLog;
