//! Storage Layer
//!
//! Persistence for the notifier's own settings. Host data is never stored here.

pub mod config;

pub use config::*;
