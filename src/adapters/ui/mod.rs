pub mod banner;
pub mod buffer;
pub mod terminal;
pub mod tui;

pub use buffer::BufferView;
pub use terminal::TerminalView;
pub use tui::TuiInputPort;

/// Prints the welcome banner (unless disabled) and applies the neon theme for
/// all subsequent inquire prompts. Call once at startup.
pub fn init_ui(show_banner: bool, endpoint: &str) {
    if show_banner {
        banner::print_welcome(endpoint);
    }
    tui::apply_theme();
}
