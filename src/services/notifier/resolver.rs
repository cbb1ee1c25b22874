//! Channel Resolver
//!
//! Finds the bot token and chat id for a project by walking up its ancestor
//! chain, then falling back to the global settings. Token and chat id are
//! looked up independently; the first non-blank value for each wins.

use std::collections::HashSet;

use tracker_telegram_core::{HostDirectory, Project};

use crate::models::settings::NotifierSettings;

use super::types::ChannelConfig;

/// Chat id value that explicitly disables notifications.
pub const DISABLED_CHANNEL: &str = "-";

/// Iterates a project and its ancestors, nearest first.
///
/// Each step prefers the host's record over the one it was handed, so a
/// project snapshot without `parent_id` still walks the real tree. Stops
/// when a parent is missing from the host or when a project id repeats.
pub struct Lineage<'a> {
    directory: &'a dyn HostDirectory,
    next: Option<Project>,
    seen: HashSet<u64>,
}

impl<'a> Lineage<'a> {
    pub fn new(directory: &'a dyn HostDirectory, project: &Project) -> Self {
        Self {
            directory,
            next: Some(project.clone()),
            seen: HashSet::new(),
        }
    }
}

impl Iterator for Lineage<'_> {
    type Item = Project;

    fn next(&mut self) -> Option<Project> {
        let current = self.next.take()?;
        let current = self.directory.project(current.id).unwrap_or(current);
        if !self.seen.insert(current.id) {
            return None;
        }
        self.next = current
            .parent_id
            .and_then(|parent_id| self.directory.project(parent_id));
        Some(current)
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub struct ChannelResolver<'a> {
    directory: &'a dyn HostDirectory,
    settings: &'a NotifierSettings,
}

impl<'a> ChannelResolver<'a> {
    pub fn new(directory: &'a dyn HostDirectory, settings: &'a NotifierSettings) -> Self {
        Self {
            directory,
            settings,
        }
    }

    pub fn resolve(&self, project: &Project) -> ChannelConfig {
        ChannelConfig {
            bot_token: self.bot_token(project),
            chat_id: self.chat_id(project),
        }
    }

    pub fn bot_token(&self, project: &Project) -> Option<String> {
        self.first_in_chain(project, &self.settings.token_field)
            .or_else(|| present(Some(self.settings.telegram_bot_token.clone())))
    }

    /// `None` when nothing is configured or the winning value is `-`.
    pub fn chat_id(&self, project: &Project) -> Option<String> {
        self.first_in_chain(project, &self.settings.channel_field)
            .or_else(|| present(Some(self.settings.channel.clone())))
            .filter(|channel| channel != DISABLED_CHANNEL)
    }

    fn first_in_chain(&self, project: &Project, field_name: &str) -> Option<String> {
        Lineage::new(self.directory, project)
            .find_map(|p| present(self.directory.project_custom_value(p.id, field_name)))
    }
}
