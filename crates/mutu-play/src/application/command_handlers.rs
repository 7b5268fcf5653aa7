//! Command handlers for the Play context.
//!
//! Each engine owns one storage slot (the quiz also owns the best score).
//! Handlers load it, apply the command, and write it back only when the
//! command produced events.

use std::sync::Mutex;

use mutu_content::ContentDocument;
use mutu_content::domain::document::Mood;
use mutu_core::clock::Clock;
use mutu_core::error::DomainError;
use mutu_core::event::record_events;
use mutu_core::rng::DeterministicRng;
use mutu_core::store::{self, StateStore, StorageKey};
use mutu_core::text::LanguageMode;
use serde::Serialize;

use crate::application::query_handlers::{
    FinaleView, MatchView, QuizView, current_pair_ids, load_hold, load_match, load_quiz,
};
use crate::domain::commands::{
    AnswerQuestion, FlipCard, PressHold, ReleaseHold, RestartQuiz, StartMatch,
};
use crate::domain::reveal::HoldGesture;

/// Result of a successfully handled play command.
#[derive(Debug, Serialize)]
pub struct PlayCommandResult<V> {
    /// Event types emitted, in order.
    pub events: Vec<&'static str>,
    /// State after the command.
    pub view: V,
}

/// Handles `AnswerQuestion`.
///
/// # Errors
///
/// Returns `DomainError::Rejected` for a stale or completed question,
/// `DomainError::Validation` for an unknown option, or
/// `DomainError::Infrastructure` if persisting fails.
pub async fn handle_answer_question(
    command: &AnswerQuestion,
    content: &ContentDocument,
    mode: LanguageMode,
    clock: &dyn Clock,
    store: &dyn StateStore,
) -> Result<PlayCommandResult<QuizView>, DomainError> {
    let quiz = &content.play.quiz;
    let mut run = load_quiz(content, store).await;

    if let Err(e) = run.answer(
        quiz,
        &command.question_id,
        command.option_index,
        command.correlation_id,
        clock,
    ) {
        tracing::warn!(
            correlation_id = %command.correlation_id,
            question_id = %command.question_id,
            error = %e,
            "quiz answer refused"
        );
        return Err(e);
    }

    store::set(store, StorageKey::QuizSession, run.session()).await?;
    if run.best_score_changed() {
        store::set(store, StorageKey::QuizBestScore, &run.best_score()).await?;
    }

    Ok(PlayCommandResult {
        events: record_events(run.uncommitted_events()),
        view: QuizView::new(&run, content, mode),
    })
}

/// Handles `RestartQuiz`.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if persisting fails.
pub async fn handle_restart_quiz(
    command: &RestartQuiz,
    content: &ContentDocument,
    mode: LanguageMode,
    clock: &dyn Clock,
    store: &dyn StateStore,
) -> Result<PlayCommandResult<QuizView>, DomainError> {
    let mut run = load_quiz(content, store).await;
    run.restart(command.correlation_id, clock);
    store::set(store, StorageKey::QuizSession, run.session()).await?;

    Ok(PlayCommandResult {
        events: record_events(run.uncommitted_events()),
        view: QuizView::new(&run, content, mode),
    })
}

/// Handles `StartMatch`: deals a new board from the currently visible
/// memories, replacing any game in progress.
///
/// The RNG is locked only around the synchronous shuffle, never across an
/// await.
///
/// # Errors
///
/// Returns `DomainError::Rejected` if no memory is visible, or
/// `DomainError::Infrastructure` if persisting fails.
pub async fn handle_start_match(
    command: &StartMatch,
    content: &ContentDocument,
    mode: LanguageMode,
    rng: &Mutex<dyn DeterministicRng + Send>,
    clock: &dyn Clock,
    store: &dyn StateStore,
) -> Result<PlayCommandResult<MatchView>, DomainError> {
    let pairs = current_pair_ids(content, clock.now(), store).await;
    let mut game = load_match(store).await;

    {
        let mut rng_guard = rng
            .lock()
            .map_err(|e| DomainError::Infrastructure(format!("RNG mutex poisoned: {e}")))?;
        game.start(&pairs, &mut *rng_guard, command.correlation_id, clock)?;
    }
    store::set(store, StorageKey::MatchSession, game.session()).await?;

    Ok(PlayCommandResult {
        events: record_events(game.uncommitted_events()),
        view: MatchView::new(game.session(), content, mode),
    })
}

/// Handles `FlipCard`. A pending mismatch whose delay has passed is flipped
/// back first, so the new card starts a fresh turn.
///
/// # Errors
///
/// Returns `DomainError::Rejected` or `DomainError::Validation` when the
/// flip is not allowed, or `DomainError::Infrastructure` if persisting fails.
pub async fn handle_flip_card(
    command: &FlipCard,
    content: &ContentDocument,
    mode: LanguageMode,
    clock: &dyn Clock,
    store: &dyn StateStore,
) -> Result<PlayCommandResult<MatchView>, DomainError> {
    let mut game = load_match(store).await;
    game.settle(
        content.play.memory_match.flip_back_ms,
        command.correlation_id,
        clock,
    );

    if let Err(e) = game.flip(command.card_index, command.correlation_id, clock) {
        tracing::debug!(
            correlation_id = %command.correlation_id,
            card_index = command.card_index,
            error = %e,
            "card flip refused"
        );
        return Err(e);
    }

    store::set(store, StorageKey::MatchSession, game.session()).await?;
    Ok(PlayCommandResult {
        events: record_events(game.uncommitted_events()),
        view: MatchView::new(game.session(), content, mode),
    })
}

async fn commit_hold(
    gesture: &HoldGesture,
    content: &ContentDocument,
    mood: Mood,
    mode: LanguageMode,
    clock: &dyn Clock,
    store: &dyn StateStore,
) -> Result<PlayCommandResult<FinaleView>, DomainError> {
    let events = gesture.uncommitted_events();
    if !events.is_empty() {
        store::set(store, StorageKey::FinaleHold, &gesture.phase()).await?;
    }
    Ok(PlayCommandResult {
        events: record_events(events),
        view: FinaleView::new(gesture.phase(), content, mood, mode, clock.now()),
    })
}

/// Handles `PressHold`.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if persisting fails.
pub async fn handle_press_hold(
    command: &PressHold,
    content: &ContentDocument,
    mood: Mood,
    mode: LanguageMode,
    clock: &dyn Clock,
    store: &dyn StateStore,
) -> Result<PlayCommandResult<FinaleView>, DomainError> {
    let mut gesture = load_hold(content, store).await;
    gesture.press(command.correlation_id, clock);
    commit_hold(&gesture, content, mood, mode, clock, store).await
}

/// Handles `ReleaseHold`.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if persisting fails.
pub async fn handle_release_hold(
    command: &ReleaseHold,
    content: &ContentDocument,
    mood: Mood,
    mode: LanguageMode,
    clock: &dyn Clock,
    store: &dyn StateStore,
) -> Result<PlayCommandResult<FinaleView>, DomainError> {
    let mut gesture = load_hold(content, store).await;
    gesture.release(command.correlation_id, clock);
    commit_hold(&gesture, content, mood, mode, clock, store).await
}
