//! Hold-to-reveal gesture.
//!
//! Progress is sampled from timestamps rather than ticked, so the stored
//! phase plus "now" is enough to know where the gesture is.

use chrono::{DateTime, Utc};
use mutu_core::clock::{Clock, elapsed_ms};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::events::{HoldReleased, PlayEvent, PlayEventKind};

/// Shortest drain after an early release, in milliseconds.
pub const MIN_DRAIN_MS: f64 = 220.0;

/// Drain duration from `from`: `max(220, 280 + from * 260)` ms.
#[must_use]
pub fn drain_ms(from: f64) -> f64 {
    (280.0 + from * 260.0).max(MIN_DRAIN_MS)
}

#[allow(clippy::cast_precision_loss)]
fn ratio(elapsed: i64, over: f64) -> f64 {
    if over <= 0.0 {
        return 1.0;
    }
    elapsed as f64 / over
}

/// The persisted `mutu.finale.hold` record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "camelCase")]
pub enum HoldPhase {
    #[default]
    Idle,
    /// Pressed at `started_at`, having already accumulated `base`.
    #[serde(rename_all = "camelCase")]
    Holding { started_at: DateTime<Utc>, base: f64 },
    /// Released at `released_at` with `from` progress, decaying to zero.
    #[serde(rename_all = "camelCase")]
    Draining { released_at: DateTime<Utc>, from: f64 },
    /// Terminal.
    Revealed,
}

impl HoldPhase {
    /// Progress in `[0, 1]` at `now`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self, now: DateTime<Utc>, hold_ms: u64) -> f64 {
        let value = match *self {
            Self::Idle => 0.0,
            Self::Revealed => 1.0,
            Self::Holding { started_at, base } => {
                base + ratio(elapsed_ms(started_at, now), hold_ms as f64)
            }
            Self::Draining { released_at, from } => {
                from * (1.0 - ratio(elapsed_ms(released_at, now), drain_ms(from)))
            }
        };
        value.clamp(0.0, 1.0)
    }

    /// Whether the gesture has completed by `now`, including a hold that
    /// crossed the line but has not been released yet.
    #[must_use]
    pub fn is_revealed(&self, now: DateTime<Utc>, hold_ms: u64) -> bool {
        match self {
            Self::Revealed => true,
            Self::Holding { .. } => self.progress(now, hold_ms) >= 1.0,
            Self::Idle | Self::Draining { .. } => false,
        }
    }

    /// Label used by views.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Holding { .. } => "holding",
            Self::Draining { .. } => "draining",
            Self::Revealed => "revealed",
        }
    }
}

/// The gesture plus the events produced against it.
#[derive(Debug)]
pub struct HoldGesture {
    phase: HoldPhase,
    hold_ms: u64,
    uncommitted_events: Vec<PlayEvent>,
}

impl HoldGesture {
    /// Rehydrates, sanitizing stored progress values.
    #[must_use]
    pub fn rehydrate(phase: HoldPhase, hold_ms: u64) -> Self {
        let phase = match phase {
            HoldPhase::Holding { started_at, base } if base.is_finite() => HoldPhase::Holding {
                started_at,
                base: base.clamp(0.0, 1.0),
            },
            HoldPhase::Draining { released_at, from } if from.is_finite() => {
                HoldPhase::Draining {
                    released_at,
                    from: from.clamp(0.0, 1.0),
                }
            }
            HoldPhase::Holding { .. } | HoldPhase::Draining { .. } => HoldPhase::Idle,
            other => other,
        };
        Self {
            phase,
            hold_ms,
            uncommitted_events: Vec::new(),
        }
    }

    #[must_use]
    pub fn phase(&self) -> HoldPhase {
        self.phase
    }

    /// Events produced since rehydration.
    #[must_use]
    pub fn uncommitted_events(&self) -> &[PlayEvent] {
        &self.uncommitted_events
    }

    fn reveal(&mut self, correlation_id: Uuid, clock: &dyn Clock) {
        self.phase = HoldPhase::Revealed;
        self.uncommitted_events.push(PlayEvent::new(
            PlayEventKind::FinaleRevealed,
            correlation_id,
            clock,
        ));
    }

    /// Starts holding. A press during a drain resumes from the progress left
    /// over; pressing while already holding changes nothing.
    pub fn press(&mut self, correlation_id: Uuid, clock: &dyn Clock) {
        let now = clock.now();
        match self.phase {
            HoldPhase::Revealed => {}
            HoldPhase::Holding { .. } => {
                if self.phase.is_revealed(now, self.hold_ms) {
                    self.reveal(correlation_id, clock);
                }
            }
            HoldPhase::Idle | HoldPhase::Draining { .. } => {
                let base = self.phase.progress(now, self.hold_ms);
                self.phase = HoldPhase::Holding {
                    started_at: now,
                    base,
                };
                self.uncommitted_events.push(PlayEvent::new(
                    PlayEventKind::HoldStarted,
                    correlation_id,
                    clock,
                ));
            }
        }
    }

    /// Lets go. A hold that reached full progress reveals; anything short of
    /// that starts draining.
    pub fn release(&mut self, correlation_id: Uuid, clock: &dyn Clock) {
        let now = clock.now();
        if !matches!(self.phase, HoldPhase::Holding { .. }) {
            return;
        }
        let progress = self.phase.progress(now, self.hold_ms);
        if progress >= 1.0 {
            self.reveal(correlation_id, clock);
            return;
        }
        self.phase = HoldPhase::Draining {
            released_at: now,
            from: progress,
        };
        self.uncommitted_events.push(PlayEvent::new(
            PlayEventKind::HoldReleased(HoldReleased { progress }),
            correlation_id,
            clock,
        ));
    }
}
