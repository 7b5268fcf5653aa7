//! Entry-gate middleware.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use mutu_unlocks::application::query_handlers::load_flags;

use crate::error::gate_locked;
use crate::state::AppState;

/// Refuses the request with 403 `gate_locked` until the gate is passed. A
/// document with the gate disabled lets everything through.
pub async fn require_gate(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let flags = load_flags(&state.content, state.store.as_ref()).await;
    if !flags.gate {
        tracing::debug!(path = %request.uri().path(), "request blocked by entry gate");
        return gate_locked();
    }
    next.run(request).await
}
