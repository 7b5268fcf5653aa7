//! Routes for the Memories context: timeline, milestones and future items.

use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use mutu_journey::application::query_handlers::load_language;
use mutu_memories::application::command_handlers::{self, MemoryCommandResult};
use mutu_memories::application::query_handlers::{
    self, FutureView, MilestonesView, TimelineQuery, TimelineView,
};
use mutu_memories::domain::commands::{OpenMemory, ReactToMemory};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Query string for GET /timeline.
#[derive(Debug, Default, Deserialize)]
pub struct TimelineParams {
    /// Tag filter; `All` or absent means no filter.
    pub tag: Option<String>,
    /// Free-text search.
    pub q: Option<String>,
}

/// Request body for POST /open.
#[derive(Debug, Deserialize)]
pub struct OpenMemoryRequest {
    pub item_id: String,
}

/// Request body for POST /react.
#[derive(Debug, Deserialize)]
pub struct ReactRequest {
    pub item_id: String,
    /// One of the configured reactions. Sending the active one clears it.
    pub reaction: String,
}

/// GET /timeline
#[instrument(skip(state))]
async fn get_timeline(
    State(state): State<AppState>,
    Query(params): Query<TimelineParams>,
) -> Json<TimelineView> {
    let mode = load_language(&state.content, state.store.as_ref()).await;
    let query = TimelineQuery {
        tag: params.tag,
        q: params.q,
    };
    Json(
        query_handlers::get_timeline(
            &state.content,
            &query,
            mode,
            state.clock.now(),
            state.store.as_ref(),
        )
        .await,
    )
}

/// POST /open
#[instrument(skip(state, request), fields(item_id = %request.item_id))]
async fn open_memory(
    State(state): State<AppState>,
    Json(request): Json<OpenMemoryRequest>,
) -> Result<Json<MemoryCommandResult>, ApiError> {
    let command = OpenMemory {
        correlation_id: Uuid::new_v4(),
        item_id: request.item_id,
    };

    info!(correlation_id = %command.correlation_id, "handling open_memory command");

    let mode = load_language(&state.content, state.store.as_ref()).await;
    let result = command_handlers::handle_open_memory(
        &command,
        &state.content,
        mode,
        state.clock.as_ref(),
        state.store.as_ref(),
    )
    .await?;
    Ok(Json(result))
}

/// POST /react
#[instrument(skip(state, request), fields(item_id = %request.item_id))]
async fn react(
    State(state): State<AppState>,
    Json(request): Json<ReactRequest>,
) -> Result<Json<MemoryCommandResult>, ApiError> {
    let command = ReactToMemory {
        correlation_id: Uuid::new_v4(),
        item_id: request.item_id,
        reaction: request.reaction,
    };

    info!(correlation_id = %command.correlation_id, "handling react_to_memory command");

    let mode = load_language(&state.content, state.store.as_ref()).await;
    let result = command_handlers::handle_react_to_memory(
        &command,
        &state.content,
        mode,
        state.clock.as_ref(),
        state.store.as_ref(),
    )
    .await?;
    Ok(Json(result))
}

/// GET /milestones
#[instrument(skip(state))]
async fn get_milestones(State(state): State<AppState>) -> Json<MilestonesView> {
    let mode = load_language(&state.content, state.store.as_ref()).await;
    Json(query_handlers::get_milestones(
        &state.content,
        mode,
        state.clock.now(),
    ))
}

/// GET /future
#[instrument(skip(state))]
async fn get_future(State(state): State<AppState>) -> Json<FutureView> {
    let mode = load_language(&state.content, state.store.as_ref()).await;
    Json(
        query_handlers::get_future(&state.content, mode, state.clock.now(), state.store.as_ref())
            .await,
    )
}

/// Returns the router for the memories context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/timeline", get(get_timeline))
        .route("/open", post(open_memory))
        .route("/react", post(react))
        .route("/milestones", get(get_milestones))
        .route("/future", get(get_future))
}
