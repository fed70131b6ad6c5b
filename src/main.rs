//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here; sending is delegated to ChatService.

use chatbox::adapters::backend::{HttpChatBackend, MockChatBackend};
use chatbox::adapters::ui::{TerminalView, TuiInputPort};
use chatbox::ports::{ChatBackend, InputPort};
use chatbox::shared::config::AppConfig;
use chatbox::usecases::ChatService;
use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    // Logs go to stderr at warn by default so they stay out of the transcript.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    let cfg = match AppConfig::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!(error = %e, "config load failed, using defaults");
            AppConfig::default()
        }
    };

    // --- Backend ---
    let (backend, endpoint): (Arc<dyn ChatBackend>, String) = if cfg.is_mock() {
        warn!("CHATBOX_MOCK set, using mock chat backend");
        (
            Arc::new(MockChatBackend::with_delay(300)) as Arc<dyn ChatBackend>,
            "mock backend".to_string(),
        )
    } else {
        let http = HttpChatBackend::new(cfg.server_url_or_default(), cfg.chat_path_or_default())
            .map_err(|e| anyhow::anyhow!("{}", e))?;
        info!(url = %http.chat_url(), "using HTTP chat backend");
        let endpoint = http.chat_url().to_string();
        (Arc::new(http) as Arc<dyn ChatBackend>, endpoint)
    };

    chatbox::adapters::ui::init_ui(cfg.show_banner(), &endpoint);

    // --- Services ---
    let chat_service = Arc::new(ChatService::new(Arc::clone(&backend)));
    let view = Arc::new(TerminalView::new());

    let input_port: Arc<dyn InputPort> =
        Arc::new(TuiInputPort::new(chat_service, backend, view));

    // --- Run (main menu -> Chat / Health / Exit) ---
    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
