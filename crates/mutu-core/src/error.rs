//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A referenced item (memory, coupon, question, card) does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A request was malformed with respect to the content document.
    #[error("validation error: {0}")]
    Validation(String),

    /// A recoverable refusal the user can retry, such as a wrong gate phrase.
    /// The message is display copy and is shown as-is.
    #[error("{0}")]
    Rejected(String),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
