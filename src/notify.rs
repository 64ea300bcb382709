use crate::config::TelegramConfig;
use crate::error::{Error, Result};
use std::future::Future;
use tokio::task::JoinHandle;

/// Sends visit notifications to a Telegram chat
#[derive(Debug, Clone)]
pub struct Notifier {
    config: TelegramConfig,
    client: reqwest::Client,
}

impl Notifier {
    /// Create a notifier with its own HTTP client
    pub fn new(config: TelegramConfig) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    /// Create a notifier that shares an existing HTTP client
    pub fn with_client(config: TelegramConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    /// Whether messages can be sent at all
    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.config.api_base.trim_end_matches('/'),
            self.config.bot_token
        )
    }

    /// Posts `text` to the configured chat
    pub async fn send(&self, text: &str) -> Result<()> {
        if !self.is_configured() {
            return Err(Error::NotConfigured);
        }

        ::log::info!("Sending message to chat_id: {}", self.config.chat_id);
        let response = self
            .client
            .post(self.endpoint())
            .form(&[("chat_id", self.config.chat_id.as_str()), ("text", text)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // The URL embeds the bot token, report the API base only
            return Err(Error::Status {
                url: self.config.api_base.clone(),
                status: status.as_u16(),
            });
        }
        Ok(())
    }

    /// Sends in the background. Failures are logged, never returned.
    pub fn spawn_send(&self, text: String) -> JoinHandle<()> {
        let notifier = self.clone();
        tokio::spawn(async move {
            if let Err(e) = notifier.send(&text).await {
                ::log::warn!("Failed to send message to Telegram: {}", e);
            }
        })
    }
}

/// Runs `work` while a spawned notification is in flight, then waits for the
/// notification whatever `work` produced. The runtime may shut down right after
/// this returns, so an unfinished send would be cancelled.
pub async fn run_alongside<T>(
    notification: Option<JoinHandle<()>>,
    work: impl Future<Output = T>,
) -> T {
    let output = work.await;
    if let Some(task) = notification {
        if let Err(e) = task.await {
            ::log::warn!("Notification task did not finish: {}", e);
        }
    }
    output
}

/// Message reported for each preview request
pub fn visit_message(client_ip: Option<&str>, target: &str) -> String {
    let ip = client_ip
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .unwrap_or("unknown");
    format!("IP Address: {}\nTarget: {}", ip, target)
}
