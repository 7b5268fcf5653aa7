//! Mutu Memoir — HTTP API library: configuration, state, errors and routes.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod telemetry;
