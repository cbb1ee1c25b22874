//! Integration Tests Module
//!
//! End-to-end tests for the notifier: host events in, Bot API requests out
//! (against a local mock server), plus settings persistence.

// Created/edited events through NotifierService and the host hook
mod notifier_test;

// Settings file load, update, and reset
mod config_test;
