//! Route modules organized by bounded context.

use axum::Router;
use axum::middleware;
use mutu_content::domain::document::Mood;
use mutu_core::text::LanguageMode;
use mutu_journey::application::query_handlers::load_preferences;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub mod content;
pub mod gate;
pub mod health;
pub mod journey;
pub mod keepsakes;
pub mod memories;
pub mod mutations;
pub mod play;
pub mod unlocks;

/// Builds the full application: health at the root, everything else under
/// `/api/v1`. Only the gate itself and the metadata it needs stay reachable
/// before the gate is passed.
pub fn app(state: AppState) -> Router {
    // TODO: Replace CorsLayer::permissive() with the rendering layer's origin once it is deployed.
    Router::new()
        .merge(health::router())
        .nest("/api/v1", api_router(&state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn api_router(state: &AppState) -> Router<AppState> {
    let open = Router::new()
        .nest("/content", content::open_router())
        .nest("/unlocks", unlocks::open_router());

    let gated = Router::new()
        .nest("/content", content::router())
        .nest("/journey", journey::router())
        .nest("/unlocks", unlocks::router())
        .nest("/memories", memories::router())
        .nest("/play", play::router())
        .nest("/keepsakes", keepsakes::router())
        .route_layer(middleware::from_fn_with_state(state.clone(), gate::require_gate));

    open.merge(gated).route_layer(middleware::from_fn_with_state(
        state.clone(),
        mutations::serialize_mutations,
    ))
}

/// Language and mood as currently persisted.
pub(crate) async fn display_prefs(state: &AppState) -> (LanguageMode, Mood) {
    let prefs = load_preferences(&state.content, state.store.as_ref()).await;
    (prefs.language, prefs.mood)
}
