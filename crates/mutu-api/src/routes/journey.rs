//! Routes for the Journey context: step navigation and preferences.

use axum::extract::{Query, State};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use mutu_content::domain::document::{Mood, MotionPreference};
use mutu_core::text::LanguageMode;
use mutu_journey::application::command_handlers::{self, JourneyCommandResult};
use mutu_journey::application::query_handlers::{self, JourneyView, PreferencesView};
use mutu_journey::domain::commands::{Navigate, Navigation, ResetAll, UpdatePreferences};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Query string for GET /journey.
#[derive(Debug, Default, Deserialize)]
pub struct JourneyQuery {
    /// The client's system reduced-motion setting, if known.
    pub reduced_motion: Option<bool>,
}

/// Request body for POST /go-to.
#[derive(Debug, Deserialize)]
pub struct GoToRequest {
    /// Target step index; clamped into range.
    pub index: i64,
}

/// Request body for PUT /preferences. Absent fields are left alone.
#[derive(Debug, Default, Deserialize)]
pub struct PreferencesRequest {
    pub language: Option<LanguageMode>,
    pub mood: Option<Mood>,
    pub motion: Option<MotionPreference>,
}

/// GET /
#[instrument(skip(state))]
async fn get_journey(
    State(state): State<AppState>,
    Query(query): Query<JourneyQuery>,
) -> Json<JourneyView> {
    Json(
        query_handlers::get_journey(&state.content, query.reduced_motion, state.store.as_ref())
            .await,
    )
}

async fn navigate(
    state: &AppState,
    navigation: Navigation,
) -> Result<Json<JourneyCommandResult<JourneyView>>, ApiError> {
    let command = Navigate {
        correlation_id: Uuid::new_v4(),
        navigation,
    };

    info!(correlation_id = %command.correlation_id, ?navigation, "handling navigate command");

    let result = command_handlers::handle_navigate(
        &command,
        &state.content,
        state.clock.as_ref(),
        state.store.as_ref(),
    )
    .await?;
    Ok(Json(result))
}

/// POST /go-to
#[instrument(skip(state, request), fields(index = request.index))]
async fn go_to(
    State(state): State<AppState>,
    Json(request): Json<GoToRequest>,
) -> Result<Json<JourneyCommandResult<JourneyView>>, ApiError> {
    navigate(&state, Navigation::GoTo(request.index)).await
}

/// POST /next
#[instrument(skip(state))]
async fn next(
    State(state): State<AppState>,
) -> Result<Json<JourneyCommandResult<JourneyView>>, ApiError> {
    navigate(&state, Navigation::Next).await
}

/// POST /back
#[instrument(skip(state))]
async fn back(
    State(state): State<AppState>,
) -> Result<Json<JourneyCommandResult<JourneyView>>, ApiError> {
    navigate(&state, Navigation::Back).await
}

/// POST /restart
#[instrument(skip(state))]
async fn restart(
    State(state): State<AppState>,
) -> Result<Json<JourneyCommandResult<JourneyView>>, ApiError> {
    navigate(&state, Navigation::Restart).await
}

/// POST /reset
#[instrument(skip(state))]
async fn reset(
    State(state): State<AppState>,
) -> Result<Json<JourneyCommandResult<JourneyView>>, ApiError> {
    let command = ResetAll {
        correlation_id: Uuid::new_v4(),
    };

    info!(correlation_id = %command.correlation_id, "handling reset_all command");

    let result = command_handlers::handle_reset_all(
        &command,
        &state.content,
        state.clock.as_ref(),
        state.store.as_ref(),
    )
    .await?;
    Ok(Json(result))
}

/// PUT /preferences
#[instrument(skip(state, request))]
async fn update_preferences(
    State(state): State<AppState>,
    Json(request): Json<PreferencesRequest>,
) -> Result<Json<JourneyCommandResult<PreferencesView>>, ApiError> {
    let command = UpdatePreferences {
        correlation_id: Uuid::new_v4(),
        language: request.language,
        mood: request.mood,
        motion: request.motion,
    };

    info!(correlation_id = %command.correlation_id, "handling update_preferences command");

    let result = command_handlers::handle_update_preferences(
        &command,
        &state.content,
        state.clock.as_ref(),
        state.store.as_ref(),
    )
    .await?;
    Ok(Json(result))
}

/// Returns the router for the journey context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_journey))
        .route("/go-to", post(go_to))
        .route("/next", post(next))
        .route("/back", post(back))
        .route("/restart", post(restart))
        .route("/reset", post(reset))
        .route("/preferences", put(update_preferences))
}
