//! Message Formatter
//!
//! Builds the Markdown headline and change block for an issue event. Pure:
//! it only reads from the host collaborators and never performs I/O itself.

use tracker_telegram_core::{
    HostDirectory, Issue, Journal, NotificationEvent, Translator, UrlBuilder,
};

use super::fields::FieldRenderer;
use super::text::{escape, mentions};
use super::types::{AttachmentBlock, FormattedMessage};

pub struct MessageFormatter<'a> {
    directory: &'a dyn HostDirectory,
    translator: &'a dyn Translator,
    urls: &'a dyn UrlBuilder,
}

impl<'a> MessageFormatter<'a> {
    pub fn new(
        directory: &'a dyn HostDirectory,
        translator: &'a dyn Translator,
        urls: &'a dyn UrlBuilder,
    ) -> Self {
        Self {
            directory,
            translator,
            urls,
        }
    }

    pub fn format(&self, event: &NotificationEvent) -> FormattedMessage {
        match event {
            NotificationEvent::Created { issue } => self.created(issue),
            NotificationEvent::Edited { issue, journal } => self.updated(issue, journal),
        }
    }

    /// `*[Infra]* _alice_ created [Bug #42: Disk full](url)` plus mentions
    /// from the description.
    pub fn created(&self, issue: &Issue) -> FormattedMessage {
        let headline = format!(
            "*[{}]* _{}_ created [{}]({}){}",
            escape(&issue.project.name),
            escape(&issue.author),
            escape(&issue.reference()),
            self.urls.issue_url(issue.id, None),
            mentions(issue.description.as_deref().unwrap_or_default()).unwrap_or_default(),
        );

        FormattedMessage {
            headline,
            attachment: None,
        }
    }

    /// `*[Infra]* _bob_ updated [Disk full](url#change-9)` plus mentions from
    /// the note, with the note and each changed field underneath.
    pub fn updated(&self, issue: &Issue, journal: &Journal) -> FormattedMessage {
        let anchor = format!("change-{}", journal.id);
        let notes = journal.notes.as_deref().unwrap_or_default();

        let headline = format!(
            "*[{}]* _{}_ updated [{}]({}){}",
            escape(&issue.project.name),
            escape(&journal.user),
            escape(&issue.subject),
            self.urls.issue_url(issue.id, Some(&anchor)),
            mentions(notes).unwrap_or_default(),
        );

        let renderer = FieldRenderer::new(self.directory, self.translator, self.urls);
        let attachment = AttachmentBlock {
            text: journal.notes.as_deref().map(escape),
            fields: renderer.render_all(&journal.details),
        };

        FormattedMessage {
            headline,
            attachment: if attachment.is_empty() {
                None
            } else {
                Some(attachment)
            },
        }
    }
}
