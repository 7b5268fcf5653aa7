//! Mutu Core — shared domain abstractions.
//!
//! This crate defines the fundamental traits and types that every bounded
//! context depends on: time, randomness, errors, domain events, the
//! persisted-state adapter and bilingual text resolution. It contains no
//! infrastructure code.

pub mod clock;
pub mod error;
pub mod event;
pub mod rng;
pub mod store;
pub mod text;
