//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here. Dependencies flow inward.

pub mod entities;
pub mod errors;

pub use entities::{
    CONNECTION_ERROR_TEXT, ChatReply, ChatRequest, HealthStatus, OutgoingMessage, Speaker,
    Transcript, TranscriptEntry,
};
pub use errors::DomainError;
