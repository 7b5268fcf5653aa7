//! Routes for the Play context: quiz, memory match and the finale reveal.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use mutu_journey::application::query_handlers::load_language;
use mutu_play::application::command_handlers::{self, PlayCommandResult};
use mutu_play::application::query_handlers::{self, FinaleView, MatchView, QuizView};
use mutu_play::domain::commands::{
    AnswerQuestion, FlipCard, PressHold, ReleaseHold, RestartQuiz, StartMatch,
};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use super::display_prefs;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /quiz/answer.
#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    /// The question being answered; must be the current one.
    pub question_id: String,
    pub option_index: usize,
}

/// Request body for POST /match/flip.
#[derive(Debug, Deserialize)]
pub struct FlipRequest {
    pub card_index: usize,
}

/// GET /quiz
#[instrument(skip(state))]
async fn get_quiz(State(state): State<AppState>) -> Json<QuizView> {
    let mode = load_language(&state.content, state.store.as_ref()).await;
    Json(query_handlers::get_quiz(&state.content, mode, state.store.as_ref()).await)
}

/// POST /quiz/answer
#[instrument(skip(state, request), fields(question_id = %request.question_id))]
async fn answer_question(
    State(state): State<AppState>,
    Json(request): Json<AnswerRequest>,
) -> Result<Json<PlayCommandResult<QuizView>>, ApiError> {
    let command = AnswerQuestion {
        correlation_id: Uuid::new_v4(),
        question_id: request.question_id,
        option_index: request.option_index,
    };

    info!(correlation_id = %command.correlation_id, "handling answer_question command");

    let mode = load_language(&state.content, state.store.as_ref()).await;
    let result = command_handlers::handle_answer_question(
        &command,
        &state.content,
        mode,
        state.clock.as_ref(),
        state.store.as_ref(),
    )
    .await?;
    Ok(Json(result))
}

/// POST /quiz/restart
#[instrument(skip(state))]
async fn restart_quiz(
    State(state): State<AppState>,
) -> Result<Json<PlayCommandResult<QuizView>>, ApiError> {
    let command = RestartQuiz {
        correlation_id: Uuid::new_v4(),
    };

    info!(correlation_id = %command.correlation_id, "handling restart_quiz command");

    let mode = load_language(&state.content, state.store.as_ref()).await;
    let result = command_handlers::handle_restart_quiz(
        &command,
        &state.content,
        mode,
        state.clock.as_ref(),
        state.store.as_ref(),
    )
    .await?;
    Ok(Json(result))
}

/// GET /match
#[instrument(skip(state))]
async fn get_match(State(state): State<AppState>) -> Json<MatchView> {
    let mode = load_language(&state.content, state.store.as_ref()).await;
    Json(
        query_handlers::get_match(&state.content, mode, state.clock.now(), state.store.as_ref())
            .await,
    )
}

/// POST /match/start
#[instrument(skip(state))]
async fn start_match(
    State(state): State<AppState>,
) -> Result<Json<PlayCommandResult<MatchView>>, ApiError> {
    let command = StartMatch {
        correlation_id: Uuid::new_v4(),
    };

    info!(correlation_id = %command.correlation_id, "handling start_match command");

    let mode = load_language(&state.content, state.store.as_ref()).await;
    let result = command_handlers::handle_start_match(
        &command,
        &state.content,
        mode,
        &state.rng,
        state.clock.as_ref(),
        state.store.as_ref(),
    )
    .await?;
    Ok(Json(result))
}

/// POST /match/flip
#[instrument(skip(state, request), fields(card_index = request.card_index))]
async fn flip_card(
    State(state): State<AppState>,
    Json(request): Json<FlipRequest>,
) -> Result<Json<PlayCommandResult<MatchView>>, ApiError> {
    let command = FlipCard {
        correlation_id: Uuid::new_v4(),
        card_index: request.card_index,
    };

    info!(correlation_id = %command.correlation_id, "handling flip_card command");

    let mode = load_language(&state.content, state.store.as_ref()).await;
    let result = command_handlers::handle_flip_card(
        &command,
        &state.content,
        mode,
        state.clock.as_ref(),
        state.store.as_ref(),
    )
    .await?;
    Ok(Json(result))
}

/// GET /finale
#[instrument(skip(state))]
async fn get_finale(State(state): State<AppState>) -> Json<FinaleView> {
    let (mode, mood) = display_prefs(&state).await;
    Json(
        query_handlers::get_finale(
            &state.content,
            mood,
            mode,
            state.clock.now(),
            state.store.as_ref(),
        )
        .await,
    )
}

/// POST /finale/hold
#[instrument(skip(state))]
async fn press_hold(
    State(state): State<AppState>,
) -> Result<Json<PlayCommandResult<FinaleView>>, ApiError> {
    let command = PressHold {
        correlation_id: Uuid::new_v4(),
    };

    info!(correlation_id = %command.correlation_id, "handling press_hold command");

    let (mode, mood) = display_prefs(&state).await;
    let result = command_handlers::handle_press_hold(
        &command,
        &state.content,
        mood,
        mode,
        state.clock.as_ref(),
        state.store.as_ref(),
    )
    .await?;
    Ok(Json(result))
}

/// POST /finale/release
#[instrument(skip(state))]
async fn release_hold(
    State(state): State<AppState>,
) -> Result<Json<PlayCommandResult<FinaleView>>, ApiError> {
    let command = ReleaseHold {
        correlation_id: Uuid::new_v4(),
    };

    info!(correlation_id = %command.correlation_id, "handling release_hold command");

    let (mode, mood) = display_prefs(&state).await;
    let result = command_handlers::handle_release_hold(
        &command,
        &state.content,
        mood,
        mode,
        state.clock.as_ref(),
        state.store.as_ref(),
    )
    .await?;
    Ok(Json(result))
}

/// Returns the router for the play context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/quiz", get(get_quiz))
        .route("/quiz/answer", post(answer_question))
        .route("/quiz/restart", post(restart_quiz))
        .route("/match", get(get_match))
        .route("/match/start", post(start_match))
        .route("/match/flip", post(flip_card))
        .route("/finale", get(get_finale))
        .route("/finale/hold", post(press_hold))
        .route("/finale/release", post(release_hold))
}
