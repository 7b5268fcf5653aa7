pub mod aggregates;
pub mod commands;
pub mod events;
pub mod milestones;
pub mod timeline;
