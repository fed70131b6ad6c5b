//! Application configuration. Service address, backend choice, UI toggles.

use serde::Deserialize;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_CHAT_PATH: &str = "/chat";

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Base URL of the chat service. Read from CHATBOX_SERVER_URL.
    #[serde(default)]
    pub server_url: Option<String>,

    /// Path of the chat endpoint under `server_url`. Read from CHATBOX_CHAT_PATH.
    #[serde(default)]
    pub chat_path: Option<String>,

    /// Use the offline echo backend instead of HTTP. Read from CHATBOX_MOCK.
    #[serde(default)]
    pub mock: Option<bool>,

    /// Print the startup banner. Read from CHATBOX_BANNER.
    #[serde(default)]
    pub banner: Option<bool>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("CHATBOX").try_parsing(true));
        if let Ok(path) = std::env::var("CHATBOX_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    pub fn server_url_or_default(&self) -> &str {
        self.server_url.as_deref().unwrap_or(DEFAULT_SERVER_URL)
    }

    pub fn chat_path_or_default(&self) -> &str {
        self.chat_path.as_deref().unwrap_or(DEFAULT_CHAT_PATH)
    }

    pub fn is_mock(&self) -> bool {
        self.mock.unwrap_or(false)
    }

    pub fn show_banner(&self) -> bool {
        self.banner.unwrap_or(true)
    }
}
