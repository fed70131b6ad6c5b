//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these. The chat use case folds every
//! variant into the same user-facing text.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Server returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("View error: {0}")]
    View(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
