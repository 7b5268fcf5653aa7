//! Linear quiz engine.

use mutu_content::domain::document::{Quiz, QuizThresholds};
use mutu_core::clock::Clock;
use mutu_core::error::DomainError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::events::{
    AnswerRecorded, BestScoreImproved, PlayEvent, PlayEventKind, QuizCompleted,
};

/// Result tier, picked by [`tier_for`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizTier {
    High,
    Mid,
    Low,
}

/// Thresholds are checked high to low, so overlapping values still resolve.
#[must_use]
pub fn tier_for(score: u32, thresholds: &QuizThresholds) -> QuizTier {
    if score >= thresholds.high {
        QuizTier::High
    } else if score >= thresholds.mid {
        QuizTier::Mid
    } else {
        QuizTier::Low
    }
}

/// One scored answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnsweredQuestion {
    pub question_id: String,
    pub option_index: usize,
    pub correct: bool,
}

/// The persisted `mutu.quiz.session` record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuizSession {
    pub question_index: usize,
    pub score: u32,
    pub completed: bool,
    pub answered: Vec<AnsweredQuestion>,
}

fn total_of(quiz: &Quiz) -> u32 {
    u32::try_from(quiz.questions.len()).unwrap_or(u32::MAX)
}

/// A playthrough plus the all-time best score.
#[derive(Debug)]
pub struct QuizRun {
    session: QuizSession,
    best_score: u32,
    uncommitted_events: Vec<PlayEvent>,
}

impl QuizRun {
    /// Rehydrates, clamping whatever was stored against the current quiz:
    /// the score never exceeds the question count and a completed session
    /// sits past the last question.
    #[must_use]
    pub fn rehydrate(mut session: QuizSession, best_score: u32, quiz: &Quiz) -> Self {
        let len = quiz.questions.len();
        let total = total_of(quiz);
        session.score = session.score.min(total);
        session.answered.truncate(len);
        if len == 0 {
            session.completed = true;
        }
        session.question_index = if session.completed {
            len
        } else {
            session.question_index.min(len.saturating_sub(1))
        };
        Self {
            session,
            best_score: best_score.min(total),
            uncommitted_events: Vec::new(),
        }
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    #[must_use]
    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    /// Events produced since rehydration.
    #[must_use]
    pub fn uncommitted_events(&self) -> &[PlayEvent] {
        &self.uncommitted_events
    }

    /// Whether this run raised the best score.
    #[must_use]
    pub fn best_score_changed(&self) -> bool {
        self.uncommitted_events
            .iter()
            .any(|e| matches!(e.kind, PlayEventKind::BestScoreImproved(_)))
    }

    /// Scores the answer to the current question and advances the cursor.
    /// Answering the last question completes the run and updates the best
    /// score if this playthrough beat it.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Rejected` if the quiz is already complete or
    /// `question_id` is not the current question, and
    /// `DomainError::Validation` if `option_index` is out of range.
    pub fn answer(
        &mut self,
        quiz: &Quiz,
        question_id: &str,
        option_index: usize,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<bool, DomainError> {
        if self.session.completed {
            return Err(DomainError::Rejected("quiz already completed".to_owned()));
        }
        let question = quiz
            .questions
            .get(self.session.question_index)
            .ok_or_else(|| DomainError::Rejected("quiz already completed".to_owned()))?;
        if question.id != question_id {
            return Err(DomainError::Rejected(format!(
                "question {question_id} is not the current question"
            )));
        }
        if option_index >= question.options.len() {
            return Err(DomainError::Validation(format!(
                "option {option_index} out of range for question {question_id}"
            )));
        }

        let correct = option_index == question.answer_index;
        let total = total_of(quiz);
        if correct {
            self.session.score = (self.session.score + 1).min(total);
        }
        self.session.answered.push(AnsweredQuestion {
            question_id: question.id.clone(),
            option_index,
            correct,
        });
        self.uncommitted_events.push(PlayEvent::new(
            PlayEventKind::AnswerRecorded(AnswerRecorded {
                question_id: question.id.clone(),
                option_index,
                correct,
                score: self.session.score,
            }),
            correlation_id,
            clock,
        ));

        self.session.question_index += 1;
        if self.session.question_index >= quiz.questions.len() {
            self.complete(total, correlation_id, clock);
        }
        Ok(correct)
    }

    fn complete(&mut self, total: u32, correlation_id: Uuid, clock: &dyn Clock) {
        self.session.completed = true;
        let score = self.session.score;
        self.uncommitted_events.push(PlayEvent::new(
            PlayEventKind::QuizCompleted(QuizCompleted { score, total }),
            correlation_id,
            clock,
        ));
        if score > self.best_score {
            let previous = self.best_score;
            self.best_score = score;
            self.uncommitted_events.push(PlayEvent::new(
                PlayEventKind::BestScoreImproved(BestScoreImproved {
                    previous,
                    best: score,
                }),
                correlation_id,
                clock,
            ));
        }
    }

    /// Clears the playthrough. The best score survives.
    pub fn restart(&mut self, correlation_id: Uuid, clock: &dyn Clock) {
        self.session = QuizSession::default();
        self.uncommitted_events.push(PlayEvent::new(
            PlayEventKind::QuizRestarted,
            correlation_id,
            clock,
        ));
    }
}
