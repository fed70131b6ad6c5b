//! Handle send: input field -> transcript -> backend -> transcript.
//!
//! Split into `submit` (synchronous, runs before the next input is accepted)
//! and `deliver` (awaits the backend) so a front end can let sends overlap.

use crate::domain::{CONNECTION_ERROR_TEXT, OutgoingMessage, TranscriptEntry};
use crate::ports::{ChatBackend, ChatView};
use std::sync::Arc;
use tracing::{debug, info};

/// Result of one `handle_send`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Input was empty; nothing happened.
    Skipped,
    /// The backend answered and the answer was appended.
    Answered,
    /// The error placeholder was appended.
    Failed,
}

pub struct ChatService {
    backend: Arc<dyn ChatBackend>,
}

impl ChatService {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self { backend }
    }

    /// Full send: `submit` followed by `deliver`.
    pub async fn handle_send(&self, view: &dyn ChatView) -> SendOutcome {
        match self.submit(view) {
            Some(message) => self.deliver(message, view).await,
            None => SendOutcome::Skipped,
        }
    }

    /// Reads the input field. Empty input is a silent no-op; otherwise the raw
    /// text is appended as a user entry and the field is cleared.
    pub fn submit(&self, view: &dyn ChatView) -> Option<OutgoingMessage> {
        let message = OutgoingMessage::new(view.input_value())?;
        view.append(&TranscriptEntry::user(message.as_str()));
        view.clear_input();
        Some(message)
    }

    /// Sends the message and appends either the answer or the fixed error text.
    pub async fn deliver(&self, message: OutgoingMessage, view: &dyn ChatView) -> SendOutcome {
        debug!(message_len = message.as_str().len(), "sending chat message");
        match self.backend.ask(&message).await {
            Ok(reply) => {
                info!(answer_len = reply.answer.len(), "received answer");
                view.append(&TranscriptEntry::bot(reply.answer));
                view.scroll_to_bottom();
                SendOutcome::Answered
            }
            Err(e) => {
                debug!(error = %e, "chat request failed");
                view.append(&TranscriptEntry::bot(CONNECTION_ERROR_TEXT));
                SendOutcome::Failed
            }
        }
    }
}
