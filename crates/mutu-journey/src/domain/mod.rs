pub mod aggregates;
pub mod commands;
pub mod events;
pub mod preferences;
pub mod steps;
