//! Settings Models
//!
//! Notifier configuration as stored in `settings.json`. The host reads this
//! once at startup and hands the notifier an immutable copy.

use serde::{Deserialize, Serialize};
use tracker_telegram_core::ProxyConfig;

pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";
pub const DEFAULT_TOKEN_FIELD: &str = "Telegram BOT Token";
pub const DEFAULT_CHANNEL_FIELD: &str = "Telegram Channel";

/// Global notifier settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotifierSettings {
    /// Bot token used when no project in the chain overrides it
    #[serde(default)]
    pub telegram_bot_token: String,
    /// Default chat id; `-` disables notifications globally
    #[serde(default)]
    pub channel: String,
    /// Carried for compatibility with existing plugin settings; not sent
    #[serde(default)]
    pub icon: String,
    /// Carried for compatibility with existing plugin settings; not sent
    #[serde(default)]
    pub username: String,
    /// Host name used when building issue links, e.g. `tracker.example.com`
    #[serde(default = "default_host_name")]
    pub host_name: String,
    /// `http` or `https`
    #[serde(default = "default_protocol")]
    pub protocol: String,
    /// Bot API base URL
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Project custom field holding a per-project bot token
    #[serde(default = "default_token_field")]
    pub token_field: String,
    /// Project custom field holding a per-project chat id
    #[serde(default = "default_channel_field")]
    pub channel_field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<ProxyConfig>,
}

fn default_host_name() -> String {
    "localhost:3000".to_string()
}

fn default_protocol() -> String {
    "http".to_string()
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_token_field() -> String {
    DEFAULT_TOKEN_FIELD.to_string()
}

fn default_channel_field() -> String {
    DEFAULT_CHANNEL_FIELD.to_string()
}

impl Default for NotifierSettings {
    fn default() -> Self {
        Self {
            telegram_bot_token: String::new(),
            channel: String::new(),
            icon: String::new(),
            username: String::new(),
            host_name: default_host_name(),
            protocol: default_protocol(),
            api_base: default_api_base(),
            token_field: default_token_field(),
            channel_field: default_channel_field(),
            proxy: None,
        }
    }
}

/// Partial settings update
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SettingsUpdate {
    pub telegram_bot_token: Option<String>,
    pub channel: Option<String>,
    pub icon: Option<String>,
    pub username: Option<String>,
    pub host_name: Option<String>,
    pub protocol: Option<String>,
    pub api_base: Option<String>,
    pub token_field: Option<String>,
    pub channel_field: Option<String>,
    /// `Some(None)` clears the proxy
    pub proxy: Option<Option<ProxyConfig>>,
}

impl NotifierSettings {
    pub fn apply_update(&mut self, update: SettingsUpdate) {
        if let Some(token) = update.telegram_bot_token {
            self.telegram_bot_token = token;
        }
        if let Some(channel) = update.channel {
            self.channel = channel;
        }
        if let Some(icon) = update.icon {
            self.icon = icon;
        }
        if let Some(username) = update.username {
            self.username = username;
        }
        if let Some(host_name) = update.host_name {
            self.host_name = host_name;
        }
        if let Some(protocol) = update.protocol {
            self.protocol = protocol;
        }
        if let Some(api_base) = update.api_base {
            self.api_base = api_base;
        }
        if let Some(field) = update.token_field {
            self.token_field = field;
        }
        if let Some(field) = update.channel_field {
            self.channel_field = field;
        }
        if let Some(proxy) = update.proxy {
            self.proxy = proxy;
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if !["http", "https"].contains(&self.protocol.as_str()) {
            return Err(format!(
                "Invalid protocol: {}. Must be 'http' or 'https'",
                self.protocol
            ));
        }

        if self.host_name.trim().is_empty() {
            return Err("host_name must not be empty".to_string());
        }

        match url::Url::parse(&self.api_base) {
            Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => {}
            _ => return Err(format!("Invalid api_base: {}", self.api_base)),
        }

        if self.token_field.trim().is_empty() || self.channel_field.trim().is_empty() {
            return Err("custom field names must not be empty".to_string());
        }

        if let Some(ref proxy) = self.proxy {
            proxy.validate()?;
        }

        Ok(())
    }

    /// Base URL of the host application, e.g. `https://tracker.example.com`.
    pub fn host_url(&self) -> String {
        format!("{}://{}", self.protocol, self.host_name.trim_end_matches('/'))
    }
}
