//! Routes for the static sections of the Content Document.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use mutu_content::application::query_handlers::{
    self, CoverView, GalleryView, LetterView, MetaView, NurseView,
};
use mutu_journey::application::query_handlers::load_language;
use tracing::instrument;

use super::display_prefs;
use crate::state::AppState;

/// GET /meta
#[instrument(skip(state))]
async fn get_meta(State(state): State<AppState>) -> Json<MetaView> {
    let mode = load_language(&state.content, state.store.as_ref()).await;
    Json(query_handlers::get_meta(&state.content, mode))
}

/// GET /cover
#[instrument(skip(state))]
async fn get_cover(State(state): State<AppState>) -> Json<CoverView> {
    let mode = load_language(&state.content, state.store.as_ref()).await;
    Json(query_handlers::get_cover(&state.content, mode))
}

/// GET /letter
#[instrument(skip(state))]
async fn get_letter(State(state): State<AppState>) -> Json<LetterView> {
    let (mode, mood) = display_prefs(&state).await;
    Json(query_handlers::get_letter(&state.content, mood, mode))
}

/// GET /gallery
#[instrument(skip(state))]
async fn get_gallery(State(state): State<AppState>) -> Json<GalleryView> {
    let mode = load_language(&state.content, state.store.as_ref()).await;
    Json(query_handlers::get_gallery(&state.content, mode))
}

/// GET /nurse
#[instrument(skip(state))]
async fn get_nurse(State(state): State<AppState>) -> Json<NurseView> {
    let mode = load_language(&state.content, state.store.as_ref()).await;
    Json(query_handlers::get_nurse(&state.content, mode))
}

/// Content routes reachable before the gate is passed.
pub fn open_router() -> Router<AppState> {
    Router::new().route("/meta", get(get_meta))
}

/// Returns the router for the content context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cover", get(get_cover))
        .route("/letter", get(get_letter))
        .route("/gallery", get(get_gallery))
        .route("/nurse", get(get_nurse))
}
