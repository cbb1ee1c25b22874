//! Data Models
//!
//! Configuration structures owned by the notifier. Host-side entities live in
//! `tracker-telegram-core`.

pub mod settings;

pub use settings::*;
