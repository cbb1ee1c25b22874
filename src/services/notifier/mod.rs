//! Telegram Issue Notifier
//!
//! Turns issue creation and edit events into Telegram `sendMessage` calls.
//! The destination is resolved per project, walking up the project tree
//! before falling back to the global settings.

pub mod channels;
pub mod fields;
pub mod formatter;
pub mod integration;
pub mod links;
pub mod resolver;
pub mod service;
pub mod text;
pub mod types;

pub use channels::telegram::TelegramChannel;
pub use channels::NotifyChannel;
pub use formatter::MessageFormatter;
pub use integration::dispatch_on_event;
pub use links::HostUrlBuilder;
pub use resolver::{ChannelResolver, Lineage};
pub use service::{NotifierService, PreparedDelivery};
pub use types::*;
