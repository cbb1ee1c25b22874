//! Notification Channels
//!
//! A channel knows how to deliver an already-rendered `OutboundMessage`.
//! Formatting and destination lookup happen before a channel is involved.

pub mod telegram;

use async_trait::async_trait;

use super::types::{ConnectionTestResult, NotifyError, OutboundMessage};

#[async_trait]
pub trait NotifyChannel: Send + Sync {
    fn name(&self) -> &'static str;

    /// Deliver one message. Non-2xx responses are errors.
    async fn send(&self, message: &OutboundMessage, bot_token: &str) -> Result<(), NotifyError>;

    /// Send a fixed test message and report latency. Never returns `Err`
    /// for transport problems; those are folded into the result.
    async fn test(&self, bot_token: &str, chat_id: Option<&str>) -> ConnectionTestResult;
}
