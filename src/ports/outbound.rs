//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{ChatReply, DomainError, HealthStatus, OutgoingMessage, TranscriptEntry};

/// The question-answering service behind the chat.
#[async_trait::async_trait]
pub trait ChatBackend: Send + Sync {
    /// Send one message and return the decoded reply.
    ///
    /// Any transport, status or decode problem is an `Err`; callers do not retry.
    async fn ask(&self, message: &OutgoingMessage) -> Result<ChatReply, DomainError>;

    /// Query the service's health endpoint.
    async fn health(&self) -> Result<HealthStatus, DomainError>;
}

/// The chat display: an input field plus the transcript.
///
/// Methods take `&self` so several in-flight sends can share one view.
pub trait ChatView: Send + Sync {
    /// Current contents of the input field.
    fn input_value(&self) -> String;

    fn set_input(&self, value: &str);

    fn clear_input(&self);

    /// Append one entry to the transcript.
    fn append(&self, entry: &TranscriptEntry);

    fn scroll_to_bottom(&self);
}
