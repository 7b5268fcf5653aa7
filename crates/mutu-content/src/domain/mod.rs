//! Content schema and load-time validation.

pub mod document;
pub mod validation;
