//! Tracker Telegram Core
//!
//! Host-facing types for the Tracker Telegram workspace. This crate has no
//! HTTP or runtime dependencies; it only describes what the host hands over
//! and what the notifier may ask of it.
//!
//! ## Module Organization
//!
//! - `error` - Core error types (`CoreError`, `CoreResult`)
//! - `model` - Issue, journal, and project snapshots plus `NotificationEvent`
//! - `host` - Collaborator traits (`HostDirectory`, `UrlBuilder`, `Translator`,
//!   `NotificationSink`) and their in-memory implementations
//! - `proxy` - Outbound proxy configuration

pub mod error;
pub mod host;
pub mod model;
pub mod proxy;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{CoreError, CoreResult};

// ── Host Model ─────────────────────────────────────────────────────────
pub use model::{
    Attachment, DetailProperty, Issue, Journal, JournalDetail, NotificationEvent, Project,
};

// ── Host Collaborators ─────────────────────────────────────────────────
pub use host::{
    HostDirectory, InMemoryDirectory, NotificationSink, ReferenceKind, StaticTranslator,
    Translator, UrlBuilder,
};

// ── Proxy Types ────────────────────────────────────────────────────────
pub use proxy::{ProxyConfig, ProxyProtocol};
