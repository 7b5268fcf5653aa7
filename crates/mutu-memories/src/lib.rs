//! Mutu Memoir — Memories bounded context.
//!
//! The chaptered memory timeline with search, tag filter, viewed progress and
//! one reaction per memory; milestone day counters; and the future timeline
//! of date- or passcode-gated entries.

pub mod application;
pub mod domain;
