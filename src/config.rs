use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

/// Environment variable holding the Telegram bot token
pub const BOT_TOKEN_VAR: &str = "TELEGRAM_BOT_TOKEN";

/// Environment variable holding the Telegram chat id
pub const CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

/// Configuration for building link previews
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Title used when the target page has none
    #[serde(default = "default_fallback_title")]
    pub fallback_title: String,

    /// Upper bound in seconds on fetching and scanning the target page
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent sent when fetching the target page
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Where visit notifications go
    #[serde(default)]
    pub telegram: TelegramConfig,
}

/// Credentials and endpoint for Telegram notifications
#[derive(Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot API token
    #[serde(default)]
    pub bot_token: String,

    /// Chat that receives the messages
    #[serde(default)]
    pub chat_id: String,

    /// Base URL of the Bot API
    #[serde(default = "default_telegram_api")]
    pub api_base: String,
}

/// Default value for fallback_title
fn default_fallback_title() -> String {
    "Redirecting...".to_string()
}

/// Default value for timeout_secs
fn default_timeout_secs() -> u64 {
    10
}

/// Default value for user_agent
fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

/// Default value for api_base
fn default_telegram_api() -> String {
    "https://api.telegram.org".to_string()
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            fallback_title: default_fallback_title(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            telegram: TelegramConfig::default(),
        }
    }
}

impl PreviewConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, Box<dyn Error>> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Fill Telegram credentials from the process environment
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Fill Telegram credentials from any variable lookup. Empty values are ignored.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup(BOT_TOKEN_VAR).filter(|v| !v.is_empty()) {
            self.telegram.bot_token = token;
        }
        if let Some(chat_id) = lookup(CHAT_ID_VAR).filter(|v| !v.is_empty()) {
            self.telegram.chat_id = chat_id;
        }
        self
    }

    /// The fetch timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            chat_id: String::new(),
            api_base: default_telegram_api(),
        }
    }
}

impl TelegramConfig {
    /// Create a configuration for the public Bot API
    pub fn new(bot_token: &str, chat_id: &str) -> Self {
        Self {
            bot_token: bot_token.to_string(),
            chat_id: chat_id.to_string(),
            api_base: default_telegram_api(),
        }
    }

    /// Whether both the token and the chat id are present
    pub fn is_configured(&self) -> bool {
        !self.bot_token.is_empty() && !self.chat_id.is_empty()
    }
}

// Keeps the bot token out of logs
impl fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = if self.bot_token.is_empty() {
            "<unset>"
        } else {
            "<redacted>"
        };
        f.debug_struct("TelegramConfig")
            .field("bot_token", &token)
            .field("chat_id", &self.chat_id)
            .field("api_base", &self.api_base)
            .finish()
    }
}
