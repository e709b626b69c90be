pub mod catalogs;
pub mod gemini_client_http;
pub mod memory_key_value_store;
pub mod storage;

pub use catalogs::load_builtin_registry;
pub use gemini_client_http::HttpGeminiClient;
pub use memory_key_value_store::MemoryKeyValueStore;
pub use storage::{FileKeyValueStore, FilesystemActivityStore};
