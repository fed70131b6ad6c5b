//! Implements InputPort. Inquire-based interactive prompts.
//!
//! Main menu -> chat loop / health check. Each chat line goes through
//! `ChatService::submit`; delivery runs in a spawned task so sends can overlap.

use crate::domain::DomainError;
use crate::ports::{ChatBackend, ChatView, InputPort};
use crate::usecases::{ChatService, SendOutcome};
use async_trait::async_trait;
use crossterm::ExecutableCommand;
use crossterm::cursor::MoveToPreviousLine;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use inquire::error::InquireError;
use inquire::ui::{Attributes, Color as InquireColor, RenderConfig, StyleSheet, Styled};
use inquire::{Select, Text};
use std::io::stdout;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Typed in chat mode to return to the main menu.
pub const BACK_COMMAND: &str = "/back";

const MENU_CHAT: &str = "Chat";
const MENU_HEALTH: &str = "Check server health";
const MENU_EXIT: &str = "Exit";

/// Neon prompt theme for every inquire prompt.
pub fn apply_theme() {
    let config = RenderConfig::default()
        .with_prompt_prefix(Styled::new("›").with_fg(InquireColor::LightCyan))
        .with_answered_prompt_prefix(Styled::new("›").with_fg(InquireColor::DarkCyan))
        .with_highlighted_option_prefix(Styled::new("▸").with_fg(InquireColor::LightMagenta))
        .with_selected_option(Some(
            StyleSheet::new()
                .with_fg(InquireColor::LightMagenta)
                .with_attr(Attributes::BOLD),
        ));
    inquire::set_global_render_config(config);
}

fn print_status(color: Color, text: &str) {
    let mut out = stdout();
    let _ = out.execute(SetForegroundColor(color));
    let _ = out.execute(Print(text));
    let _ = out.execute(Print("\n"));
    let _ = out.execute(ResetColor);
}

/// Map inquire errors: Esc / Ctrl-C become `None`, anything else is a view error.
fn prompt_result<T>(result: Result<T, InquireError>) -> Result<Option<T>, DomainError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(DomainError::View(e.to_string())),
    }
}

/// TUI adapter. Inquire prompts over a shared terminal view.
pub struct TuiInputPort<V: ChatView + 'static> {
    service: Arc<ChatService>,
    backend: Arc<dyn ChatBackend>,
    view: Arc<V>,
}

impl<V: ChatView + 'static> TuiInputPort<V> {
    pub fn new(service: Arc<ChatService>, backend: Arc<dyn ChatBackend>, view: Arc<V>) -> Self {
        Self {
            service,
            backend,
            view,
        }
    }

    /// Chat loop. Deliveries still in flight when the user leaves are awaited
    /// before returning, so every send gets its bot entry before the menu redraws.
    async fn run_chat(&self) -> Result<(), DomainError> {
        print_status(
            Color::DarkGrey,
            &format!("Type a message and press Enter. {BACK_COMMAND} returns to the menu."),
        );
        let mut pending = JoinSet::new();
        let result = self.read_lines(&mut pending).await;
        Self::drain(&mut pending).await;
        result
    }

    async fn read_lines(&self, pending: &mut JoinSet<SendOutcome>) -> Result<(), DomainError> {
        loop {
            let line = tokio::task::spawn_blocking(|| Text::new("").prompt())
                .await
                .map_err(|e| DomainError::View(e.to_string()))?;
            let Some(line) = prompt_result(line)? else {
                return Ok(());
            };
            if line == BACK_COMMAND {
                return Ok(());
            }

            // inquire leaves the answered prompt on screen; the transcript re-renders it.
            let mut out = stdout();
            let _ = out.execute(MoveToPreviousLine(1));
            let _ = out.execute(Clear(ClearType::CurrentLine));

            self.dispatch(&line, pending);
        }
    }

    /// Submit one line and start its delivery in `pending`. Returns false for empty input.
    fn dispatch(&self, line: &str, pending: &mut JoinSet<SendOutcome>) -> bool {
        self.view.set_input(line);
        let Some(message) = self.service.submit(self.view.as_ref()) else {
            return false;
        };
        let service = Arc::clone(&self.service);
        let view = Arc::clone(&self.view);
        pending.spawn(async move { service.deliver(message, view.as_ref()).await });
        true
    }

    /// Wait for every outstanding delivery. Returns how many finished.
    async fn drain(pending: &mut JoinSet<SendOutcome>) -> usize {
        let mut finished = 0;
        while let Some(joined) = pending.join_next().await {
            match joined {
                Ok(outcome) => {
                    debug!(?outcome, "send finished");
                    finished += 1;
                }
                Err(e) => warn!(error = %e, "delivery task failed"),
            }
        }
        finished
    }

    async fn run_health(&self) {
        match self.backend.health().await {
            Ok(health) if health.is_healthy() => {
                print_status(Color::Green, &format!("{} is healthy", health.service));
            }
            Ok(health) => {
                print_status(
                    Color::Yellow,
                    &format!("{} reports status {}", health.service, health.status),
                );
            }
            Err(e) => {
                debug!(error = %e, "health check failed");
                print_status(Color::Red, &format!("Server unreachable: {e}"));
            }
        }
    }
}

#[async_trait]
impl<V: ChatView + 'static> InputPort for TuiInputPort<V> {
    async fn run(&self) -> Result<(), DomainError> {
        loop {
            let choice = tokio::task::spawn_blocking(|| {
                Select::new("What next?", vec![MENU_CHAT, MENU_HEALTH, MENU_EXIT]).prompt()
            })
            .await
            .map_err(|e| DomainError::View(e.to_string()))?;

            match prompt_result(choice)? {
                Some(MENU_CHAT) => self.run_chat().await?,
                Some(MENU_HEALTH) => self.run_health().await,
                _ => return Ok(()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::backend::MockChatBackend;
    use crate::adapters::ui::BufferView;
    use crate::domain::{CONNECTION_ERROR_TEXT, TranscriptEntry};

    fn port(backend: MockChatBackend) -> (TuiInputPort<BufferView>, Arc<BufferView>) {
        let backend: Arc<dyn ChatBackend> = Arc::new(backend);
        let view = Arc::new(BufferView::new());
        let service = Arc::new(ChatService::new(Arc::clone(&backend)));
        (TuiInputPort::new(service, backend, Arc::clone(&view)), view)
    }

    #[tokio::test]
    async fn test_leaving_chat_waits_for_pending_replies() {
        let (tui, view) = port(MockChatBackend::with_delay(50));
        let mut pending = JoinSet::new();

        assert!(tui.dispatch("first", &mut pending));
        assert!(tui.dispatch("second", &mut pending));
        assert_eq!(view.transcript().len(), 2);

        let finished = TuiInputPort::<BufferView>::drain(&mut pending).await;

        assert_eq!(finished, 2);
        let transcript = view.transcript();
        assert_eq!(transcript.len(), 4);
        let mut answers: Vec<_> = transcript.entries()[2..]
            .iter()
            .map(|e| e.text.clone())
            .collect();
        answers.sort();
        assert_eq!(answers, vec!["Echo: first", "Echo: second"]);
    }

    #[tokio::test]
    async fn test_pending_failure_still_shows_error_entry() {
        let (tui, view) = port(MockChatBackend::failing());
        let mut pending = JoinSet::new();

        assert!(tui.dispatch("hello", &mut pending));
        assert!(!tui.dispatch("", &mut pending));
        TuiInputPort::<BufferView>::drain(&mut pending).await;

        assert_eq!(
            view.transcript().entries(),
            &[
                TranscriptEntry::user("hello"),
                TranscriptEntry::bot(CONNECTION_ERROR_TEXT)
            ]
        );
    }

    #[test]
    fn test_cancel_and_interrupt_mean_leave() {
        assert_eq!(
            prompt_result::<String>(Err(InquireError::OperationCanceled)).unwrap(),
            None
        );
        assert_eq!(
            prompt_result::<String>(Err(InquireError::OperationInterrupted)).unwrap(),
            None
        );
        assert_eq!(
            prompt_result(Ok("hi".to_string())).unwrap().as_deref(),
            Some("hi")
        );
    }

    #[test]
    fn test_other_prompt_errors_are_view_errors() {
        let err = prompt_result::<String>(Err(InquireError::NotTTY)).unwrap_err();
        assert!(matches!(err, DomainError::View(_)));
    }
}
