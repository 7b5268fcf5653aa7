//! Loading and read-only views over the content document.

pub mod loader;
pub mod query_handlers;
