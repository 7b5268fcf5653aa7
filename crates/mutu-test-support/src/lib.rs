//! Shared test mocks, fixtures and utilities for Mutu Memoir.

mod clock;
mod fixture;
mod rng;
mod store;

pub use clock::{FixedClock, at};
pub use fixture::{FIXTURE_JSON, fixture_content};
pub use rng::{MockRng, SequenceRng};
pub use store::{CorruptStateStore, FailingStateStore, RecordingStateStore};
