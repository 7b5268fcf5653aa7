//! Routes for the Unlock Engine context.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use mutu_journey::application::query_handlers::load_language;
use mutu_unlocks::application::command_handlers::{
    self, FuturePasscodeOutcome, UnlockCommandResult,
};
use mutu_unlocks::application::query_handlers::{self, UnlocksView, VaultView};
use mutu_unlocks::domain::commands::{SubmitFuturePasscode, SubmitGatePhrase, TapVault};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /gate.
#[derive(Debug, Deserialize)]
pub struct GateRequest {
    pub phrase: String,
}

/// Request body for POST /future.
#[derive(Debug, Deserialize)]
pub struct FuturePasscodeRequest {
    pub code: String,
}

/// GET /
#[instrument(skip(state))]
async fn get_unlocks(State(state): State<AppState>) -> Json<UnlocksView> {
    Json(query_handlers::get_unlocks(&state.content, state.store.as_ref()).await)
}

/// POST /gate
#[instrument(skip(state, request))]
async fn submit_gate(
    State(state): State<AppState>,
    Json(request): Json<GateRequest>,
) -> Result<Json<UnlockCommandResult<UnlocksView>>, ApiError> {
    let command = SubmitGatePhrase {
        correlation_id: Uuid::new_v4(),
        phrase: request.phrase,
    };

    info!(correlation_id = %command.correlation_id, "handling submit_gate_phrase command");

    let mode = load_language(&state.content, state.store.as_ref()).await;
    let result = command_handlers::handle_submit_gate_phrase(
        &command,
        &state.content,
        mode,
        state.clock.as_ref(),
        state.store.as_ref(),
    )
    .await?;
    Ok(Json(result))
}

/// GET /vault
#[instrument(skip(state))]
async fn get_vault(State(state): State<AppState>) -> Json<VaultView> {
    let mode = load_language(&state.content, state.store.as_ref()).await;
    Json(query_handlers::get_vault(&state.content, mode, state.store.as_ref()).await)
}

/// POST /vault/tap
#[instrument(skip(state))]
async fn tap_vault(
    State(state): State<AppState>,
) -> Result<Json<UnlockCommandResult<VaultView>>, ApiError> {
    let command = TapVault {
        correlation_id: Uuid::new_v4(),
    };

    info!(correlation_id = %command.correlation_id, "handling tap_vault command");

    let mode = load_language(&state.content, state.store.as_ref()).await;
    let result = command_handlers::handle_tap_vault(
        &command,
        &state.content,
        mode,
        state.clock.as_ref(),
        state.store.as_ref(),
    )
    .await?;
    Ok(Json(result))
}

/// POST /future
#[instrument(skip(state, request))]
async fn submit_future_passcode(
    State(state): State<AppState>,
    Json(request): Json<FuturePasscodeRequest>,
) -> Result<Json<UnlockCommandResult<FuturePasscodeOutcome>>, ApiError> {
    let command = SubmitFuturePasscode {
        correlation_id: Uuid::new_v4(),
        code: request.code,
    };

    info!(correlation_id = %command.correlation_id, "handling submit_future_passcode command");

    let mode = load_language(&state.content, state.store.as_ref()).await;
    let result = command_handlers::handle_submit_future_passcode(
        &command,
        &state.content,
        mode,
        state.clock.as_ref(),
        state.store.as_ref(),
    )
    .await?;
    Ok(Json(result))
}

/// Unlock routes reachable before the gate is passed.
pub fn open_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_unlocks))
        .route("/gate", post(submit_gate))
}

/// Returns the router for the unlocks context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/vault", get(get_vault))
        .route("/vault/tap", post(tap_vault))
        .route("/future", post(submit_future_passcode))
}
