//! Telegram Bot API Channel
//!
//! Posts to `sendMessage` with legacy `Markdown` parse mode. Escaping of
//! host text is done by the formatter, not here.

use async_trait::async_trait;

use crate::models::settings::DEFAULT_API_BASE;
use crate::services::notifier::types::*;
use crate::services::proxy::{build_http_client, ProxyConfig};

use super::NotifyChannel;

/// Telegram Bot API client for notifications.
///
/// API endpoint: `{api_base}/bot<token>/sendMessage`
pub struct TelegramChannel {
    client: reqwest::Client,
    api_base: String,
}

impl TelegramChannel {
    pub fn new(proxy: Option<&ProxyConfig>, api_base: &str) -> Result<Self, NotifyError> {
        Ok(Self::with_client(build_http_client(proxy)?, api_base))
    }

    pub fn with_client(client: reqwest::Client, api_base: &str) -> Self {
        let api_base = if api_base.is_empty() {
            DEFAULT_API_BASE
        } else {
            api_base
        };
        Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    pub fn send_message_url(&self, bot_token: &str) -> String {
        format!("{}/bot{}/sendMessage", self.api_base, bot_token)
    }
}

#[async_trait]
impl NotifyChannel for TelegramChannel {
    fn name(&self) -> &'static str {
        "telegram"
    }

    async fn send(&self, message: &OutboundMessage, bot_token: &str) -> Result<(), NotifyError> {
        if bot_token.trim().is_empty() {
            return Err(NotifyError::InvalidConfig(
                "Telegram bot token not configured".to_string(),
            ));
        }

        let response = self
            .client
            .post(self.send_message_url(bot_token))
            .json(message)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::HttpError(format!(
                "Telegram returned HTTP {}: {}",
                status, body
            )));
        }

        Ok(())
    }

    async fn test(&self, bot_token: &str, chat_id: Option<&str>) -> ConnectionTestResult {
        let message = OutboundMessage::new(
            "*Tracker Telegram* test notification",
            chat_id.map(str::to_string),
        );

        let start = std::time::Instant::now();
        let result = self.send(&message, bot_token).await;
        let latency_ms = Some(start.elapsed().as_millis() as u32);
        let tested_at = chrono::Utc::now().to_rfc3339();

        match result {
            Ok(()) => ConnectionTestResult {
                success: true,
                latency_ms,
                error: None,
                tested_at,
            },
            Err(e) => ConnectionTestResult {
                success: false,
                latency_ms,
                error: Some(e.to_string()),
                tested_at,
            },
        }
    }
}
