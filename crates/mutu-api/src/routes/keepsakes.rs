//! Routes for the Keepsakes context: coupons and the write-back note.

use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use mutu_content::domain::document::CouponFilter;
use mutu_journey::application::query_handlers::load_language;
use mutu_keepsakes::application::command_handlers::{self, KeepsakeCommandResult};
use mutu_keepsakes::application::query_handlers::{self, CouponsView, NoteView};
use mutu_keepsakes::domain::commands::{ClearNote, SaveNote, ToggleCoupon};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Query string for GET /coupons.
#[derive(Debug, Default, Deserialize)]
pub struct CouponParams {
    #[serde(default)]
    pub filter: CouponFilter,
}

/// Request body for POST /coupons/toggle.
#[derive(Debug, Deserialize)]
pub struct ToggleCouponRequest {
    pub coupon_id: String,
    /// Filter for the returned list; defaults to `all`.
    #[serde(default)]
    pub filter: CouponFilter,
}

/// Request body for PUT /note.
#[derive(Debug, Deserialize)]
pub struct SaveNoteRequest {
    pub text: String,
}

/// GET /coupons
#[instrument(skip(state))]
async fn get_coupons(
    State(state): State<AppState>,
    Query(params): Query<CouponParams>,
) -> Json<CouponsView> {
    let mode = load_language(&state.content, state.store.as_ref()).await;
    Json(
        query_handlers::get_coupons(
            &state.content,
            params.filter,
            mode,
            state.clock.now(),
            state.store.as_ref(),
        )
        .await,
    )
}

/// POST /coupons/toggle
#[instrument(skip(state, request), fields(coupon_id = %request.coupon_id))]
async fn toggle_coupon(
    State(state): State<AppState>,
    Json(request): Json<ToggleCouponRequest>,
) -> Result<Json<KeepsakeCommandResult<CouponsView>>, ApiError> {
    let command = ToggleCoupon {
        correlation_id: Uuid::new_v4(),
        coupon_id: request.coupon_id,
    };

    info!(correlation_id = %command.correlation_id, "handling toggle_coupon command");

    let mode = load_language(&state.content, state.store.as_ref()).await;
    let result = command_handlers::handle_toggle_coupon(
        &command,
        &state.content,
        request.filter,
        mode,
        state.clock.as_ref(),
        state.store.as_ref(),
    )
    .await?;
    Ok(Json(result))
}

/// GET /note
#[instrument(skip(state))]
async fn get_note(State(state): State<AppState>) -> Json<NoteView> {
    let mode = load_language(&state.content, state.store.as_ref()).await;
    Json(query_handlers::get_note(&state.content, mode, state.store.as_ref()).await)
}

/// PUT /note
#[instrument(skip(state, request))]
async fn save_note(
    State(state): State<AppState>,
    Json(request): Json<SaveNoteRequest>,
) -> Result<Json<KeepsakeCommandResult<NoteView>>, ApiError> {
    let command = SaveNote {
        correlation_id: Uuid::new_v4(),
        text: request.text,
    };

    info!(correlation_id = %command.correlation_id, "handling save_note command");

    let mode = load_language(&state.content, state.store.as_ref()).await;
    let result = command_handlers::handle_save_note(
        &command,
        &state.content,
        mode,
        state.clock.as_ref(),
        state.store.as_ref(),
    )
    .await?;
    Ok(Json(result))
}

/// DELETE /note
#[instrument(skip(state))]
async fn clear_note(
    State(state): State<AppState>,
) -> Result<Json<KeepsakeCommandResult<NoteView>>, ApiError> {
    let command = ClearNote {
        correlation_id: Uuid::new_v4(),
    };

    info!(correlation_id = %command.correlation_id, "handling clear_note command");

    let mode = load_language(&state.content, state.store.as_ref()).await;
    let result = command_handlers::handle_clear_note(
        &command,
        &state.content,
        mode,
        state.clock.as_ref(),
        state.store.as_ref(),
    )
    .await?;
    Ok(Json(result))
}

/// Returns the router for the keepsakes context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/coupons", get(get_coupons))
        .route("/coupons/toggle", post(toggle_coupon))
        .route("/note", get(get_note).put(save_note).delete(clear_note))
}
