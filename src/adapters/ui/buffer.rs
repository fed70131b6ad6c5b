//! In-memory ChatView. Holds the transcript and input field without rendering.

use crate::domain::{Transcript, TranscriptEntry};
use crate::ports::ChatView;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

#[derive(Default)]
pub struct BufferView {
    transcript: Mutex<Transcript>,
    input: Mutex<String>,
    scrolls: AtomicUsize,
}

impl BufferView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the transcript.
    pub fn transcript(&self) -> Transcript {
        self.transcript
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// How many times `scroll_to_bottom` was called.
    pub fn scroll_count(&self) -> usize {
        self.scrolls.load(Ordering::SeqCst)
    }
}

impl ChatView for BufferView {
    fn input_value(&self) -> String {
        self.input
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_input(&self, value: &str) {
        *self.input.lock().unwrap_or_else(PoisonError::into_inner) = value.to_string();
    }

    fn clear_input(&self) {
        self.input
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn append(&self, entry: &TranscriptEntry) {
        self.transcript
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry.clone());
    }

    fn scroll_to_bottom(&self) {
        self.transcript
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .scroll_to_bottom();
        self.scrolls.fetch_add(1, Ordering::SeqCst);
    }
}
