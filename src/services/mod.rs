//! Services
//!
//! Business logic for the notifier. Services are handed host collaborators
//! and settings; they never reach into host internals directly.

pub mod notifier;
pub mod proxy;

pub use notifier::{NotifierService, NotifyChannel, TelegramChannel};
