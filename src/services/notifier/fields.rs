//! Journal Detail Rendering
//!
//! Turns raw journal details into display-ready `FieldChange`s. Reference
//! values (status ids, user ids, ...) are resolved through the host; when a
//! lookup comes back empty the escaped raw value is shown instead.

use tracker_telegram_core::{
    DetailProperty, HostDirectory, JournalDetail, ReferenceKind, Translator, UrlBuilder,
};

use super::text::escape;
use super::types::{FieldCategory, FieldChange};

/// Shown in place of an empty value.
pub const EMPTY_VALUE: &str = "-";

/// `status_id` -> `status`; keys without the suffix pass through.
pub fn normalize_key(prop_key: &str) -> &str {
    prop_key.strip_suffix("_id").unwrap_or(prop_key)
}

/// Reference kind for a normalized standard field key.
fn reference_kind(key: &str) -> Option<ReferenceKind> {
    match key {
        "tracker" => Some(ReferenceKind::Tracker),
        "project" => Some(ReferenceKind::Project),
        "status" => Some(ReferenceKind::Status),
        "priority" => Some(ReferenceKind::Priority),
        "category" => Some(ReferenceKind::Category),
        "assigned_to" => Some(ReferenceKind::User),
        "fixed_version" => Some(ReferenceKind::Version),
        _ => None,
    }
}

fn is_long_text(key: &str) -> bool {
    matches!(key, "title" | "subject" | "description")
}

pub struct FieldRenderer<'a> {
    directory: &'a dyn HostDirectory,
    translator: &'a dyn Translator,
    urls: &'a dyn UrlBuilder,
}

impl<'a> FieldRenderer<'a> {
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

    pub fn render_all(&self, details: &[JournalDetail]) -> Vec<FieldChange> {
        details.iter().map(|d| self.render(d)).collect()
    }

    pub fn render(&self, detail: &JournalDetail) -> FieldChange {
        let raw = detail.value.as_deref().unwrap_or_default();

        let (key, display_title, category) = match detail.kind() {
            DetailProperty::Cf => {
                let name = detail
                    .prop_key
                    .parse::<u64>()
                    .ok()
                    .and_then(|id| self.directory.custom_field_name(id))
                    .unwrap_or_else(|| detail.prop_key.clone());
                (name.clone(), name, FieldCategory::CustomField)
            }
            DetailProperty::Attachment => (
                "attachment".to_string(),
                self.translator.translate("label_attachment"),
                FieldCategory::Attachment,
            ),
            _ => {
                let key = normalize_key(&detail.prop_key).to_string();
                let title = self.translator.translate(&format!("field_{}", key));
                (key, title, FieldCategory::StandardField)
            }
        };

        let mut value = escape(raw);
        let mut short = true;

        match category {
            FieldCategory::StandardField => {
                if is_long_text(&key) {
                    short = false;
                } else if key == "parent" {
                    if let Some(link) = self.parent_link(raw) {
                        value = link;
                    }
                } else if let Some(kind) = reference_kind(&key) {
                    if let Some(label) = self.lookup_label(kind, raw) {
                        value = escape(&label);
                    }
                }
            }
            FieldCategory::Attachment => {
                if let Some(link) = self.attachment_link(&detail.prop_key) {
                    value = link;
                }
            }
            FieldCategory::CustomField => {}
        }

        if value.is_empty() {
            value = EMPTY_VALUE.to_string();
        }

        FieldChange {
            key,
            display_title,
            value,
            category,
            short,
        }
    }

    fn lookup_label(&self, kind: ReferenceKind, raw: &str) -> Option<String> {
        let id = raw.trim().parse::<u64>().ok()?;
        self.directory.label(kind, id)
    }

    fn attachment_link(&self, prop_key: &str) -> Option<String> {
        let id = prop_key.trim().parse::<u64>().ok()?;
        let attachment = self.directory.attachment(id)?;
        Some(format!(
            "[{}]({})",
            escape(&attachment.filename),
            self.urls.attachment_url(&attachment)
        ))
    }

    fn parent_link(&self, raw: &str) -> Option<String> {
        let id = raw.trim().parse::<u64>().ok()?;
        let issue = self.directory.issue(id)?;
        Some(format!(
            "[{}]({})",
            escape(&issue.reference()),
            self.urls.issue_url(issue.id, None)
        ))
    }
}
