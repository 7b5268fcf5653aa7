//! Mutu Memoir — API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mutu_content::ContentError;
use mutu_core::error::DomainError;
use serde::Serialize;
use thiserror::Error;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The Content Document could not be loaded or failed validation.
    #[error("content error: {0}")]
    Content(#[from] ContentError),

    /// The state store could not be opened.
    #[error("state store error: {0}")]
    Store(DomainError),

    /// The tracing pipeline could not be installed.
    #[error("telemetry error: {0}")]
    Telemetry(String),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// Response for requests made before the entry gate is passed.
#[must_use]
pub fn gate_locked() -> Response {
    let body = ErrorBody {
        error: "gate_locked",
        message: "the entry gate has not been passed".to_owned(),
    };
    (StatusCode::FORBIDDEN, Json(body)).into_response()
}

/// HTTP-layer wrapper around `DomainError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self.0 {
            DomainError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            DomainError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            DomainError::Rejected(_) => (StatusCode::FORBIDDEN, "rejected"),
            DomainError::Infrastructure(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "infrastructure_error")
            }
        };

        // Rejections carry user-facing copy; send it without the prefix.
        let message = match self.0 {
            DomainError::Rejected(message) => message,
            other => other.to_string(),
        };

        (status, Json(ErrorBody { error: error_code, message })).into_response()
    }
}
