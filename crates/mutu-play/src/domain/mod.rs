pub mod commands;
pub mod events;
pub mod memory_match;
pub mod quiz;
pub mod reveal;
