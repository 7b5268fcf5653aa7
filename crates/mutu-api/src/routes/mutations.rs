//! Serialization of state-changing requests.

use axum::extract::{Request, State};
use axum::http::Method;
use axum::middleware::Next;
use axum::response::Response;

use crate::state::AppState;

/// Runs `POST`, `PUT` and `DELETE` requests one at a time. Handlers read a
/// slot, change it and write it back, so two overlapping taps would
/// otherwise each start from the same snapshot and one would be lost.
/// Reads pass straight through.
pub async fn serialize_mutations(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if matches!(*request.method(), Method::GET | Method::HEAD | Method::OPTIONS) {
        return next.run(request).await;
    }
    let _guard = state.mutations.lock().await;
    tracing::trace!(method = %request.method(), path = %request.uri().path(), "mutation lock held");
    next.run(request).await
}
