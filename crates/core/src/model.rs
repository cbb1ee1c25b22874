//! Host Domain Model
//!
//! Snapshot types for the pieces of the issue tracker that a notification
//! needs: projects, issues, journals, and their change details. The host
//! builds these per event; nothing here is persisted.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A project in the host tracker. Projects form a tree through `parent_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Project {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<u64>,
}

impl Project {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            parent_id: None,
        }
    }

    pub fn with_parent(mut self, parent_id: u64) -> Self {
        self.parent_id = Some(parent_id);
        self
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// An issue as seen at notification time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Issue {
    pub id: u64,
    pub project: Project,
    pub tracker: String,
    pub status: String,
    pub subject: String,
    #[serde(default)]
    pub description: Option<String>,
    pub author: String,
}

impl Issue {
    /// Human-readable reference, e.g. `Bug #42: Disk full`.
    pub fn reference(&self) -> String {
        format!("{} #{}: {}", self.tracker, self.id, self.subject)
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reference())
    }
}

/// A file attached to an issue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Attachment {
    pub id: u64,
    pub filename: String,
}

/// Which part of an issue a journal detail touches.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum DetailProperty {
    /// Standard issue attribute (`status_id`, `subject`, ...)
    Attr,
    /// Custom field, keyed by custom field id
    Cf,
    /// Attachment added or removed, keyed by attachment id
    Attachment,
    /// Issue relation
    Relation,
    Other(String),
}

impl DetailProperty {
    /// Parse the host's property tag.
    pub fn from_str_value(s: &str) -> Self {
        match s {
            "attr" => Self::Attr,
            "cf" => Self::Cf,
            "attachment" => Self::Attachment,
            "relation" => Self::Relation,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for DetailProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attr => write!(f, "attr"),
            Self::Cf => write!(f, "cf"),
            Self::Attachment => write!(f, "attachment"),
            Self::Relation => write!(f, "relation"),
            Self::Other(s) => write!(f, "{}", s),
        }
    }
}

/// One raw change record inside a journal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JournalDetail {
    /// Property tag as stored by the host (`attr`, `cf`, `attachment`, ...)
    pub property: String,
    /// Attribute name, custom field id, or attachment id
    pub prop_key: String,
    #[serde(default)]
    pub old_value: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

impl JournalDetail {
    pub fn attr(prop_key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: "attr".to_string(),
            prop_key: prop_key.into(),
            old_value: None,
            value: Some(value.into()),
        }
    }

    pub fn custom_field(field_id: u64, value: impl Into<String>) -> Self {
        Self {
            property: "cf".to_string(),
            prop_key: field_id.to_string(),
            old_value: None,
            value: Some(value.into()),
        }
    }

    pub fn attachment(attachment_id: u64, filename: impl Into<String>) -> Self {
        Self {
            property: "attachment".to_string(),
            prop_key: attachment_id.to_string(),
            old_value: None,
            value: Some(filename.into()),
        }
    }

    pub fn kind(&self) -> DetailProperty {
        DetailProperty::from_str_value(&self.property)
    }
}

/// An update record: who changed what, plus an optional note.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Journal {
    pub id: u64,
    /// Display name of the editor
    pub user: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub details: Vec<JournalDetail>,
}

/// Domain events the notifier subscribes to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotificationEvent {
    Created { issue: Issue },
    Edited { issue: Issue, journal: Journal },
}

impl NotificationEvent {
    pub fn issue(&self) -> &Issue {
        match self {
            Self::Created { issue } | Self::Edited { issue, .. } => issue,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Created { .. } => "created",
            Self::Edited { .. } => "updated",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_issue() -> Issue {
        Issue {
            id: 42,
            project: Project::new(1, "Infra"),
            tracker: "Bug".to_string(),
            status: "New".to_string(),
            subject: "Disk full".to_string(),
            description: None,
            author: "alice".to_string(),
        }
    }

    #[test]
    fn test_issue_reference() {
        assert_eq!(sample_issue().reference(), "Bug #42: Disk full");
        assert_eq!(sample_issue().to_string(), "Bug #42: Disk full");
    }

    #[test]
    fn test_detail_property_parse() {
        assert_eq!(DetailProperty::from_str_value("attr"), DetailProperty::Attr);
        assert_eq!(DetailProperty::from_str_value("cf"), DetailProperty::Cf);
        assert_eq!(
            DetailProperty::from_str_value("attachment"),
            DetailProperty::Attachment
        );
        assert_eq!(
            DetailProperty::from_str_value("watcher"),
            DetailProperty::Other("watcher".to_string())
        );
        assert_eq!(DetailProperty::Other("watcher".into()).to_string(), "watcher");
    }

    #[test]
    fn test_detail_constructors() {
        let d = JournalDetail::custom_field(7, "yes");
        assert_eq!(d.kind(), DetailProperty::Cf);
        assert_eq!(d.prop_key, "7");

        let d = JournalDetail::attr("status_id", "2");
        assert_eq!(d.kind(), DetailProperty::Attr);
        assert_eq!(d.value.as_deref(), Some("2"));
    }

    #[test]
    fn test_event_deserializes_from_tagged_json() {
        let json = serde_json::json!({
            "type": "edited",
            "issue": {
                "id": 42,
                "project": { "id": 1, "name": "Infra" },
                "tracker": "Bug",
                "status": "New",
                "subject": "Disk full",
                "author": "alice"
            },
            "journal": {
                "id": 9,
                "user": "bob",
                "notes": "ping @carol",
                "details": [
                    { "property": "attr", "prop_key": "status_id", "old_value": "1", "value": "2" }
                ]
            }
        });

        let event: NotificationEvent = serde_json::from_value(json).unwrap();
        assert_eq!(event.label(), "updated");
        assert_eq!(event.issue().id, 42);
        match event {
            NotificationEvent::Edited { journal, .. } => {
                assert_eq!(journal.details.len(), 1);
                assert_eq!(journal.details[0].old_value.as_deref(), Some("1"));
            }
            _ => panic!("expected edited event"),
        }
    }
}
