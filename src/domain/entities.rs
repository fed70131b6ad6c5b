//! Domain entities. Pure data structures for the chat session.
//!
//! No HTTP/terminal types here — adapters map to and from these.

use serde::{Deserialize, Serialize};

/// Text shown in place of an answer when the request or its decoding fails.
pub const CONNECTION_ERROR_TEXT: &str = "Error connecting to server.";

/// Who produced a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Bot,
}

/// A single line of the transcript. Text is kept raw; escaping is the renderer's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub speaker: Speaker,
    pub text: String,
}

impl TranscriptEntry {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Bot,
            text: text.into(),
        }
    }
}

/// Ordered, append-only list of entries plus the current scroll position.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
    /// Index of the first visible entry.
    scroll_top: usize,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: TranscriptEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    /// Moves the scroll position onto the last entry.
    pub fn scroll_to_bottom(&mut self) {
        self.scroll_top = self.entries.len().saturating_sub(1);
    }

    /// True when the last entry is inside the visible window.
    pub fn is_at_bottom(&self) -> bool {
        self.scroll_top + 1 >= self.entries.len()
    }
}

/// User text that passed the send precondition (non-empty).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage(String);

impl OutgoingMessage {
    /// Returns `None` for the empty string. Whitespace is not trimmed.
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.is_empty() {
            None
        } else {
            Some(Self(text))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Body of `POST /chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Body returned by `POST /chat`. The service also echoes the question back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
}

/// Body returned by `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub service: String,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}
