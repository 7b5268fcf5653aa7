//! Mutu Memoir — Play bounded context.
//!
//! Three small engines: a linear quiz with tiered results, a date/moment
//! memory-match game, and the hold-to-reveal gesture guarding the finale.

pub mod application;
pub mod domain;
