//! ChatView that renders the transcript to stdout with crossterm colours.
//!
//! Entry text is escaped before printing so neither side can emit terminal
//! control sequences.

use crate::domain::{Speaker, Transcript, TranscriptEntry};
use crate::ports::ChatView;
use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use std::io::{Write, stdout};
use std::sync::{Mutex, PoisonError};

/// Cyber Green (#0ff0fc).
const USER_COLOR: Color = Color::Rgb {
    r: 0x0f,
    g: 0xf0,
    b: 0xfc,
};
/// Neon Purple (#bc13fe).
const BOT_COLOR: Color = Color::Rgb {
    r: 0xbc,
    g: 0x13,
    b: 0xfe,
};

fn label(speaker: Speaker) -> &'static str {
    match speaker {
        Speaker::User => "you",
        Speaker::Bot => "bot",
    }
}

/// Replace control characters (ESC, CR, BEL, ...) with their visible escape form.
/// CRLF counts as a newline. Newlines and tabs are kept; continuation lines
/// are indented under the label.
pub fn escape_for_terminal(text: &str) -> String {
    let text = text.replace("\r\n", "\n");
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\n' => out.push_str("\n       "),
            '\t' => out.push(c),
            c if c.is_control() => out.extend(c.escape_default()),
            c => out.push(c),
        }
    }
    out
}

#[derive(Default)]
pub struct TerminalView {
    transcript: Mutex<Transcript>,
    input: Mutex<String>,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }

    fn render(entry: &TranscriptEntry) {
        let color = match entry.speaker {
            Speaker::User => USER_COLOR,
            Speaker::Bot => BOT_COLOR,
        };
        let mut out = stdout();
        let _ = out.execute(SetForegroundColor(color));
        let _ = out.execute(Print(format!("{:>4} │ ", label(entry.speaker))));
        let _ = out.execute(ResetColor);
        let _ = out.execute(Print(escape_for_terminal(&entry.text)));
        let _ = out.execute(Print("\n"));
    }
}

impl ChatView for TerminalView {
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
        // Hold the lock while printing so concurrent appends do not interleave.
        let mut transcript = self
            .transcript
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        transcript.push(entry.clone());
        Self::render(entry);
    }

    fn scroll_to_bottom(&self) {
        self.transcript
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .scroll_to_bottom();
        let _ = stdout().flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_neutralizes_ansi_sequences() {
        let escaped = escape_for_terminal("\x1b[2Jgone\r");
        assert!(!escaped.contains('\x1b'));
        assert!(!escaped.contains('\r'));
        assert_eq!(escaped, "\\u{1b}[2Jgone\\r");
    }

    #[test]
    fn test_escape_keeps_markup_and_indents_lines() {
        assert_eq!(escape_for_terminal("<b>hi</b>"), "<b>hi</b>");
        assert_eq!(escape_for_terminal("a\nb"), "a\n       b");
    }

    #[test]
    fn test_escape_treats_crlf_as_newline() {
        assert_eq!(escape_for_terminal("a\r\nb\r\n"), "a\n       b\n       ");
        assert_eq!(escape_for_terminal("a\rb"), "a\\rb");
    }

    #[test]
    fn test_terminal_view_records_transcript() {
        let view = TerminalView::new();
        view.set_input("hi");
        assert_eq!(view.input_value(), "hi");
        view.clear_input();
        assert_eq!(view.input_value(), "");
        view.append(&TranscriptEntry::bot("ok"));
        view.scroll_to_bottom();
        let transcript = view.transcript.lock().unwrap();
        assert_eq!(transcript.len(), 1);
        assert!(transcript.is_at_bottom());
    }
}
