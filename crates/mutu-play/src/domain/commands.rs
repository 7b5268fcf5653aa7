//! Commands for the Play context.

use uuid::Uuid;

/// Command to answer the current quiz question.
#[derive(Debug, Clone)]
pub struct AnswerQuestion {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Must be the current question; guards against double submission.
    pub question_id: String,
    pub option_index: usize,
}

/// Command to start the quiz over. The best score is kept.
#[derive(Debug, Clone)]
pub struct RestartQuiz {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

/// Command to deal and shuffle a new memory-match game.
#[derive(Debug, Clone)]
pub struct StartMatch {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

/// Command to turn one card face up.
#[derive(Debug, Clone)]
pub struct FlipCard {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Position in the dealt layout.
    pub card_index: usize,
}

/// Command to begin (or resume) holding the reveal control.
#[derive(Debug, Clone)]
pub struct PressHold {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

/// Command to let go of the reveal control.
#[derive(Debug, Clone)]
pub struct ReleaseHold {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}
