//! Mutu Memoir — Journey bounded context.
//!
//! The linear step sequence the experience walks through, the persisted
//! position within it, display preferences and the reset-all affordance.

pub mod application;
pub mod domain;
