//! Mutu Memoir — persisted client state.
//!
//! Implementations of [`mutu_core::store::StateStore`]: a process-local
//! in-memory map and a directory of one JSON file per storage key.

pub mod file_store;
pub mod memory_store;

pub use file_store::JsonFileStore;
pub use memory_store::MemoryStore;
