//! Storage implementations for the last run's results.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;
