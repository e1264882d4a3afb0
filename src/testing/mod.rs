mod fake_backend;
mod memory_log;
mod memory_store;

#[allow(unused_imports)]
pub use fake_backend::FakeBackend;
#[allow(unused_imports)]
pub use memory_log::MemoryPromptLog;
#[allow(unused_imports)]
pub use memory_store::MemoryStore;
