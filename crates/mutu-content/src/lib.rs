//! Mutu Memoir — Content Document bounded context.
//!
//! The content document is produced offline and is read-only at runtime.
//! This crate owns its schema, loads it from JSON or YAML with missing
//! fields default-filled once, validates cross-references, and resolves the
//! purely presentational sections (cover, letter, gallery, nurse page) into
//! localized views.

pub mod application;
pub mod domain;

pub use application::loader::{ContentError, load_from_path, parse_json, parse_yaml};
pub use domain::document::ContentDocument;
