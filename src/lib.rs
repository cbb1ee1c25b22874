//! Tracker Telegram
//!
//! Posts issue tracker activity to Telegram. The host hands over issue and
//! journal snapshots through `NotificationSink`; this crate formats them as
//! Telegram Markdown, resolves the destination chat per project, and sends
//! them through the Bot API without blocking the host.
//!
//! - Settings persisted as JSON (`storage::ConfigService`)
//! - Message formatting and channel resolution (`services::notifier`)
//! - Outbound HTTP with optional proxy (`services::proxy`)

pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

pub use models::settings::{NotifierSettings, SettingsUpdate};
pub use services::notifier::{
    dispatch_on_event, DeliveryOutcome, NotifierService, NotifyChannel, NotifyError,
    SuppressReason, TelegramChannel,
};
pub use storage::config::ConfigService;
pub use utils::error::{AppError, AppResult};

pub use tracker_telegram_core::{
    Attachment, Issue, Journal, JournalDetail, NotificationEvent, NotificationSink, Project,
};
