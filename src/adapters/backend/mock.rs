//! Mock chat backend for running without a server.
//!
//! Echoes the message back after a simulated delay.

use crate::domain::{ChatReply, DomainError, HealthStatus, OutgoingMessage};
use crate::ports::ChatBackend;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::info;

/// Echo backend. `failing()` builds one whose every call errors.
pub struct MockChatBackend {
    /// Simulated network delay in milliseconds.
    delay_ms: u64,
    fail: bool,
    calls: AtomicUsize,
}

impl MockChatBackend {
    /// Create a new mock backend with no delay.
    pub fn new() -> Self {
        Self::with_delay(0)
    }

    pub fn with_delay(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// Number of `ask` calls seen so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockChatBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ChatBackend for MockChatBackend {
    async fn ask(&self, message: &OutgoingMessage) -> Result<ChatReply, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        info!(message_len = message.as_str().len(), "[MOCK] answering");

        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }
        if self.fail {
            return Err(DomainError::Transport("[MOCK] connection refused".to_string()));
        }

        Ok(ChatReply {
            answer: format!("Echo: {}", message.as_str()),
            question: Some(message.as_str().to_string()),
        })
    }

    async fn health(&self) -> Result<HealthStatus, DomainError> {
        if self.fail {
            return Err(DomainError::Transport("[MOCK] connection refused".to_string()));
        }
        Ok(HealthStatus {
            status: "healthy".to_string(),
            service: "mock".to_string(),
        })
    }
}
