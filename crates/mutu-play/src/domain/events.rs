//! Domain events for the Play context.

use mutu_core::clock::Clock;
use mutu_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const ANSWER_RECORDED_EVENT_TYPE: &str = "play.quiz_answer_recorded";
pub const QUIZ_COMPLETED_EVENT_TYPE: &str = "play.quiz_completed";
pub const BEST_SCORE_IMPROVED_EVENT_TYPE: &str = "play.quiz_best_score_improved";
pub const QUIZ_RESTARTED_EVENT_TYPE: &str = "play.quiz_restarted";
pub const MATCH_STARTED_EVENT_TYPE: &str = "play.match_started";
pub const CARD_FLIPPED_EVENT_TYPE: &str = "play.match_card_flipped";
pub const PAIR_MATCHED_EVENT_TYPE: &str = "play.match_pair_matched";
pub const PAIR_MISMATCHED_EVENT_TYPE: &str = "play.match_pair_mismatched";
pub const CARDS_FLIPPED_BACK_EVENT_TYPE: &str = "play.match_cards_flipped_back";
pub const MATCH_WON_EVENT_TYPE: &str = "play.match_won";
pub const HOLD_STARTED_EVENT_TYPE: &str = "play.finale_hold_started";
pub const HOLD_RELEASED_EVENT_TYPE: &str = "play.finale_hold_released";
pub const FINALE_REVEALED_EVENT_TYPE: &str = "play.finale_revealed";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRecorded {
    pub question_id: String,
    pub option_index: usize,
    pub correct: bool,
    pub score: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizCompleted {
    pub score: u32,
    pub total: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BestScoreImproved {
    pub previous: u32,
    pub best: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchStarted {
    pub pairs: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardFlipped {
    pub card_index: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairMatched {
    pub pair_id: String,
    pub moves: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairMismatched {
    pub card_indices: Vec<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchWon {
    pub moves: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoldReleased {
    /// Progress at the moment of release, in `[0, 1)`.
    pub progress: f64,
}

/// Event payload variants for the Play context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PlayEventKind {
    AnswerRecorded(AnswerRecorded),
    QuizCompleted(QuizCompleted),
    BestScoreImproved(BestScoreImproved),
    QuizRestarted,
    MatchStarted(MatchStarted),
    CardFlipped(CardFlipped),
    PairMatched(PairMatched),
    PairMismatched(PairMismatched),
    CardsFlippedBack,
    MatchWon(MatchWon),
    HoldStarted,
    HoldReleased(HoldReleased),
    FinaleRevealed,
}

impl PlayEventKind {
    fn event_type(&self) -> &'static str {
        match self {
            Self::AnswerRecorded(_) => ANSWER_RECORDED_EVENT_TYPE,
            Self::QuizCompleted(_) => QUIZ_COMPLETED_EVENT_TYPE,
            Self::BestScoreImproved(_) => BEST_SCORE_IMPROVED_EVENT_TYPE,
            Self::QuizRestarted => QUIZ_RESTARTED_EVENT_TYPE,
            Self::MatchStarted(_) => MATCH_STARTED_EVENT_TYPE,
            Self::CardFlipped(_) => CARD_FLIPPED_EVENT_TYPE,
            Self::PairMatched(_) => PAIR_MATCHED_EVENT_TYPE,
            Self::PairMismatched(_) => PAIR_MISMATCHED_EVENT_TYPE,
            Self::CardsFlippedBack => CARDS_FLIPPED_BACK_EVENT_TYPE,
            Self::MatchWon(_) => MATCH_WON_EVENT_TYPE,
            Self::HoldStarted => HOLD_STARTED_EVENT_TYPE,
            Self::HoldReleased(_) => HOLD_RELEASED_EVENT_TYPE,
            Self::FinaleRevealed => FINALE_REVEALED_EVENT_TYPE,
        }
    }
}

/// Domain event envelope for the Play context.
#[derive(Debug, Clone)]
pub struct PlayEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: PlayEventKind,
}

impl PlayEvent {
    /// Wraps `kind` with fresh metadata.
    #[must_use]
    pub fn new(kind: PlayEventKind, correlation_id: Uuid, clock: &dyn Clock) -> Self {
        Self {
            metadata: EventMetadata::new(kind.event_type(), correlation_id, clock),
            kind,
        }
    }
}

impl DomainEvent for PlayEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn to_payload(&self) -> serde_json::Value {
        serde_json::to_value(&self.kind).unwrap_or_default()
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
