mod fake_backend;
mod memory_stores;

pub use fake_backend::FakeBackend;
pub use memory_stores::MemoryActivityStore;
