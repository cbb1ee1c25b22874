//! Notifier Core Types
//!
//! Rendered message pieces, the Bot API request body, resolved channel
//! settings, and delivery outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between the headline, the note, and each field line.
pub const LINE_BREAK: &str = "\r\n";

/// Where a journal detail came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FieldCategory {
    CustomField,
    Attachment,
    StandardField,
}

/// A journal detail rendered for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldChange {
    /// Normalized field key (`status`, `assigned_to`, custom field name, ...)
    pub key: String,
    pub display_title: String,
    /// New value, rendered; never empty
    pub value: String,
    pub category: FieldCategory,
    /// False for long text fields (subject, description)
    pub short: bool,
}

impl FieldChange {
    /// `> *Status:* Closed`
    pub fn to_line(&self) -> String {
        format!("> *{}:* {}", self.display_title, self.value)
    }
}

/// Note text plus changed fields, appended under an update headline.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttachmentBlock {
    pub text: Option<String>,
    pub fields: Vec<FieldChange>,
}

impl AttachmentBlock {
    pub fn is_empty(&self) -> bool {
        self.text.as_deref().map_or(true, str::is_empty) && self.fields.is_empty()
    }
}

/// Output of the formatter, before a destination is known.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormattedMessage {
    pub headline: String,
    pub attachment: Option<AttachmentBlock>,
}

impl FormattedMessage {
    /// Flatten headline and attachment into a single markdown body.
    pub fn render(&self) -> String {
        let mut text = self.headline.clone();
        if let Some(ref attachment) = self.attachment {
            if let Some(ref note) = attachment.text {
                if !note.is_empty() {
                    text.push_str(LINE_BREAK);
                    text.push_str(note);
                }
            }
            for field in &attachment.fields {
                text.push_str(LINE_BREAK);
                text.push_str(&field.to_line());
            }
        }
        text
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ParseMode {
    #[default]
    Markdown,
}

/// Body of a Bot API `sendMessage` call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutboundMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<String>,
    pub parse_mode: ParseMode,
    pub text: String,
}

impl OutboundMessage {
    pub fn new(text: impl Into<String>, chat_id: Option<String>) -> Self {
        Self {
            chat_id,
            parse_mode: ParseMode::Markdown,
            text: text.into(),
        }
    }

    pub fn from_formatted(formatted: &FormattedMessage, chat_id: Option<String>) -> Self {
        Self::new(formatted.render(), chat_id)
    }
}

/// Token and chat id after walking the project chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelConfig {
    pub bot_token: Option<String>,
    /// `None` when unset everywhere or explicitly disabled with `-`
    pub chat_id: Option<String>,
}

/// Why a notification was not sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuppressReason {
    /// Channel resolved to nothing or to `-`
    NoChannel,
    /// No bot token anywhere in the chain or in settings
    NoToken,
}

impl fmt::Display for SuppressReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoChannel => write!(f, "no channel"),
            Self::NoToken => write!(f, "no bot token"),
        }
    }
}

/// What happened to one notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Sent,
    Suppressed(SuppressReason),
    /// Transport or API failure; logged and otherwise ignored
    Failed(String),
}

impl DeliveryOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent)
    }
}

/// Result of a connection test against the Bot API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionTestResult {
    pub success: bool,
    pub latency_ms: Option<u32>,
    pub error: Option<String>,
    pub tested_at: String,
}

/// Notification channel errors
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<reqwest::Error> for NotifyError {
    fn from(err: reqwest::Error) -> Self {
        Self::HttpError(err.to_string())
    }
}
