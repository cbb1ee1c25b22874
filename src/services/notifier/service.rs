//! Notifier Service
//!
//! Ties the formatter, the channel resolver, and the Telegram channel
//! together. Holds only immutable, shared state so it can be cloned into
//! spawned delivery tasks.

use std::sync::Arc;

use tracker_telegram_core::{
    HostDirectory, NotificationEvent, Project, StaticTranslator, Translator, UrlBuilder,
};

use crate::models::settings::NotifierSettings;
use crate::storage::config::ConfigService;
use crate::utils::error::AppResult;

use super::channels::telegram::TelegramChannel;
use super::channels::NotifyChannel;
use super::formatter::MessageFormatter;
use super::links::HostUrlBuilder;
use super::resolver::ChannelResolver;
use super::types::*;

/// A message with a known destination, ready to hand to a channel.
#[derive(Debug, Clone)]
pub struct PreparedDelivery {
    pub message: OutboundMessage,
    pub bot_token: String,
    pub issue_id: u64,
    pub project: String,
}

#[derive(Clone)]
pub struct NotifierService {
    settings: Arc<NotifierSettings>,
    directory: Arc<dyn HostDirectory>,
    translator: Arc<dyn Translator>,
    urls: Arc<dyn UrlBuilder>,
    channel: Arc<dyn NotifyChannel>,
}

impl NotifierService {
    /// Service with the default English titles, `/issues/:id` links, and a
    /// Telegram channel built from `settings`.
    pub fn new(
        settings: Arc<NotifierSettings>,
        directory: Arc<dyn HostDirectory>,
    ) -> Result<Self, NotifyError> {
        let channel = TelegramChannel::new(settings.proxy.as_ref(), &settings.api_base)?;
        let urls = HostUrlBuilder::from_settings(&settings);
        Ok(Self {
            settings,
            directory,
            translator: Arc::new(StaticTranslator::english()),
            urls: Arc::new(urls),
            channel: Arc::new(channel),
        })
    }

    /// Service built from the current contents of a settings file.
    pub fn from_config(
        config: &ConfigService,
        directory: Arc<dyn HostDirectory>,
    ) -> AppResult<Self> {
        Ok(Self::new(config.snapshot(), directory)?)
    }

    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = translator;
        self
    }

    pub fn with_url_builder(mut self, urls: Arc<dyn UrlBuilder>) -> Self {
        self.urls = urls;
        self
    }

    pub fn with_channel(mut self, channel: Arc<dyn NotifyChannel>) -> Self {
        self.channel = channel;
        self
    }

    pub fn settings(&self) -> &NotifierSettings {
        &self.settings
    }

    pub fn format(&self, event: &NotificationEvent) -> FormattedMessage {
        MessageFormatter::new(
            self.directory.as_ref(),
            self.translator.as_ref(),
            self.urls.as_ref(),
        )
        .format(event)
    }

    pub fn resolve(&self, project: &Project) -> ChannelConfig {
        ChannelResolver::new(self.directory.as_ref(), &self.settings).resolve(project)
    }

    /// Resolve the destination and render the message.
    ///
    /// Returns the reason instead when the event should not be sent.
    pub fn prepare(&self, event: &NotificationEvent) -> Result<PreparedDelivery, SuppressReason> {
        let issue = event.issue();
        let resolved = self.resolve(&issue.project);

        let chat_id = resolved.chat_id.ok_or(SuppressReason::NoChannel)?;
        let bot_token = resolved.bot_token.ok_or(SuppressReason::NoToken)?;

        let formatted = self.format(event);
        Ok(PreparedDelivery {
            message: OutboundMessage::from_formatted(&formatted, Some(chat_id)),
            bot_token,
            issue_id: issue.id,
            project: issue.project.name.clone(),
        })
    }

    /// Send a prepared message. Failures are logged and reported, never
    /// returned as errors.
    pub async fn deliver(&self, delivery: PreparedDelivery) -> DeliveryOutcome {
        match self
            .channel
            .send(&delivery.message, &delivery.bot_token)
            .await
        {
            Ok(()) => {
                tracing::debug!(
                    "Telegram notification sent for issue #{} in {}",
                    delivery.issue_id,
                    delivery.project
                );
                DeliveryOutcome::Sent
            }
            Err(e) => {
                tracing::warn!(
                    "Telegram notification for issue #{} in {} failed: {}",
                    delivery.issue_id,
                    delivery.project,
                    e
                );
                DeliveryOutcome::Failed(e.to_string())
            }
        }
    }

    /// Prepare and deliver in one step, waiting for the result.
    pub async fn notify(&self, event: &NotificationEvent) -> DeliveryOutcome {
        match self.prepare(event) {
            Ok(delivery) => self.deliver(delivery).await,
            Err(reason) => {
                tracing::debug!(
                    "Telegram notification for issue #{} {} suppressed: {}",
                    event.issue().id,
                    event.label(),
                    reason
                );
                DeliveryOutcome::Suppressed(reason)
            }
        }
    }

    /// Send a test message to the destination `project` would use, or to
    /// the global defaults when no project is given.
    pub async fn test_connection(&self, project: Option<&Project>) -> ConnectionTestResult {
        let resolved = match project {
            Some(p) => self.resolve(p),
            None => ChannelConfig {
                bot_token: Some(self.settings.telegram_bot_token.clone())
                    .filter(|t| !t.trim().is_empty()),
                chat_id: Some(self.settings.channel.clone())
                    .filter(|c| !c.trim().is_empty() && c != "-"),
            },
        };

        let Some(bot_token) = resolved.bot_token else {
            return ConnectionTestResult {
                success: false,
                latency_ms: None,
                error: Some(SuppressReason::NoToken.to_string()),
                tested_at: chrono::Utc::now().to_rfc3339(),
            };
        };

        let result = self
            .channel
            .test(&bot_token, resolved.chat_id.as_deref())
            .await;
        tracing::info!(
            "Telegram connection test via {}: success={} latency={:?}ms",
            self.channel.name(),
            result.success,
            result.latency_ms
        );
        result
    }
}

impl std::fmt::Debug for NotifierService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotifierService")
            .field("channel", &self.channel.name())
            .field("api_base", &self.settings.api_base)
            .finish()
    }
}
