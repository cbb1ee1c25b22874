//! Host Links
//!
//! Default `UrlBuilder` for hosts that use the standard `/issues/:id` and
//! `/attachments/:id` routes.

use tracker_telegram_core::{Attachment, UrlBuilder};

use crate::models::settings::NotifierSettings;

#[derive(Debug, Clone)]
pub struct HostUrlBuilder {
    base: String,
}

impl HostUrlBuilder {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_settings(settings: &NotifierSettings) -> Self {
        Self::new(settings.host_url())
    }
}

impl UrlBuilder for HostUrlBuilder {
    fn issue_url(&self, issue_id: u64, anchor: Option<&str>) -> String {
        match anchor {
            Some(anchor) if !anchor.is_empty() => {
                format!("{}/issues/{}#{}", self.base, issue_id, anchor)
            }
            _ => format!("{}/issues/{}", self.base, issue_id),
        }
    }

    fn attachment_url(&self, attachment: &Attachment) -> String {
        format!("{}/attachments/{}", self.base, attachment.id)
    }
}
