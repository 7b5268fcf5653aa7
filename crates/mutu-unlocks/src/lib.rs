//! Mutu Memoir — Unlock Engine bounded context.
//!
//! Owns the monotonic unlock flags: the entry gate, the tap-sequence vault
//! and the shared future passcode. Also evaluates whether any gated item is
//! currently visible.

pub mod application;
pub mod domain;
