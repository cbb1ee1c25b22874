//! Host Collaborators
//!
//! The notifier never touches the tracker's storage directly. Everything it
//! needs (entity labels, per-project custom values, links, field titles)
//! comes through the traits in this module. Every lookup is fallible and
//! reports absence as `None`; callers treat absence as "fall back".

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::model::{Attachment, Issue, Journal, Project};

/// Entity kinds whose ids appear as raw values in journal details.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    Tracker,
    Project,
    Status,
    Priority,
    Category,
    User,
    Version,
}

/// Read-only access to host entities.
pub trait HostDirectory: Send + Sync {
    fn project(&self, id: u64) -> Option<Project>;

    /// Value of the named project custom field, if defined and set.
    fn project_custom_value(&self, project_id: u64, field_name: &str) -> Option<String>;

    /// Name of a custom field definition.
    fn custom_field_name(&self, field_id: u64) -> Option<String>;

    /// Display label for a referenced entity.
    fn label(&self, kind: ReferenceKind, id: u64) -> Option<String>;

    fn issue(&self, id: u64) -> Option<Issue>;

    fn attachment(&self, id: u64) -> Option<Attachment>;
}

/// Builds absolute links back into the host application.
pub trait UrlBuilder: Send + Sync {
    /// Link to an issue, optionally with a fragment such as `change-9`.
    fn issue_url(&self, issue_id: u64, anchor: Option<&str>) -> String;

    fn attachment_url(&self, attachment: &Attachment) -> String;
}

/// Localized string lookup, keyed like `field_status` or `label_attachment`.
pub trait Translator: Send + Sync {
    fn translate(&self, key: &str) -> String;
}

/// Receives issue lifecycle events from the host.
///
/// Registered once at startup. Implementations must return promptly and must
/// never fail the host's own notification flow.
pub trait NotificationSink: Send + Sync {
    fn on_issue_created(&self, issue: &Issue);

    fn on_issue_updated(&self, issue: &Issue, journal: &Journal);
}

/// Snapshot-backed `HostDirectory`.
///
/// Hosts that cannot expose live lookups can push a JSON snapshot of the
/// entities a notification may reference.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryDirectory {
    #[serde(default)]
    pub projects: HashMap<u64, Project>,
    /// project id -> custom field name -> value
    #[serde(default)]
    pub project_custom_values: HashMap<u64, HashMap<String, String>>,
    #[serde(default)]
    pub custom_fields: HashMap<u64, String>,
    #[serde(default)]
    pub trackers: HashMap<u64, String>,
    #[serde(default)]
    pub statuses: HashMap<u64, String>,
    #[serde(default)]
    pub priorities: HashMap<u64, String>,
    #[serde(default)]
    pub categories: HashMap<u64, String>,
    #[serde(default)]
    pub users: HashMap<u64, String>,
    #[serde(default)]
    pub versions: HashMap<u64, String>,
    #[serde(default)]
    pub issues: HashMap<u64, Issue>,
    #[serde(default)]
    pub attachments: HashMap<u64, Attachment>,
}

impl InMemoryDirectory {
    /// Parse a JSON snapshot. Every project's parent must be present.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let directory: Self = serde_json::from_str(json)?;
        directory.check_parents()?;
        Ok(directory)
    }

    pub fn load(path: &Path) -> CoreResult<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    fn check_parents(&self) -> CoreResult<()> {
        for project in self.projects.values() {
            if let Some(parent_id) = project.parent_id {
                if !self.projects.contains_key(&parent_id) {
                    return Err(CoreError::not_found(format!(
                        "parent project {} of {}",
                        parent_id, project.id
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_project(mut self, project: Project) -> Self {
        self.projects.insert(project.id, project);
        self
    }

    pub fn with_custom_value(
        mut self,
        project_id: u64,
        field_name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.project_custom_values
            .entry(project_id)
            .or_default()
            .insert(field_name.into(), value.into());
        self
    }

    pub fn with_custom_field(mut self, field_id: u64, name: impl Into<String>) -> Self {
        self.custom_fields.insert(field_id, name.into());
        self
    }

    pub fn with_label(mut self, kind: ReferenceKind, id: u64, label: impl Into<String>) -> Self {
        let label = label.into();
        let table = match kind {
            ReferenceKind::Tracker => &mut self.trackers,
            ReferenceKind::Status => &mut self.statuses,
            ReferenceKind::Priority => &mut self.priorities,
            ReferenceKind::Category => &mut self.categories,
            ReferenceKind::User => &mut self.users,
            ReferenceKind::Version => &mut self.versions,
            ReferenceKind::Project => {
                self.projects
                    .entry(id)
                    .and_modify(|p| p.name = label.clone())
                    .or_insert_with(|| Project::new(id, label.clone()));
                return self;
            }
        };
        table.insert(id, label);
        self
    }

    pub fn with_issue(mut self, issue: Issue) -> Self {
        self.issues.insert(issue.id, issue);
        self
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.insert(attachment.id, attachment);
        self
    }

    fn labels(&self, kind: ReferenceKind) -> Option<&HashMap<u64, String>> {
        match kind {
            ReferenceKind::Tracker => Some(&self.trackers),
            ReferenceKind::Status => Some(&self.statuses),
            ReferenceKind::Priority => Some(&self.priorities),
            ReferenceKind::Category => Some(&self.categories),
            ReferenceKind::User => Some(&self.users),
            ReferenceKind::Version => Some(&self.versions),
            // Project labels come from the project table itself
            ReferenceKind::Project => None,
        }
    }
}

impl HostDirectory for InMemoryDirectory {
    fn project(&self, id: u64) -> Option<Project> {
        self.projects.get(&id).cloned()
    }

    fn project_custom_value(&self, project_id: u64, field_name: &str) -> Option<String> {
        self.project_custom_values
            .get(&project_id)
            .and_then(|values| values.get(field_name))
            .cloned()
    }

    fn custom_field_name(&self, field_id: u64) -> Option<String> {
        self.custom_fields.get(&field_id).cloned()
    }

    fn label(&self, kind: ReferenceKind, id: u64) -> Option<String> {
        match self.labels(kind) {
            Some(labels) => labels.get(&id).cloned(),
            None => self.projects.get(&id).map(|p| p.name.clone()),
        }
    }

    fn issue(&self, id: u64) -> Option<Issue> {
        self.issues.get(&id).cloned()
    }

    fn attachment(&self, id: u64) -> Option<Attachment> {
        self.attachments.get(&id).cloned()
    }
}

/// English catalog for the standard issue fields.
///
/// Unknown keys translate to themselves, so a missing entry shows up as the
/// raw key rather than an empty title.
#[derive(Debug, Clone)]
pub struct StaticTranslator {
    catalog: HashMap<String, String>,
}

impl StaticTranslator {
    pub fn english() -> Self {
        let entries = [
            ("field_subject", "Subject"),
            ("field_title", "Title"),
            ("field_description", "Description"),
            ("field_tracker", "Tracker"),
            ("field_project", "Project"),
            ("field_status", "Status"),
            ("field_priority", "Priority"),
            ("field_category", "Category"),
            ("field_assigned_to", "Assignee"),
            ("field_fixed_version", "Target version"),
            ("field_parent", "Parent task"),
            ("field_start_date", "Start date"),
            ("field_due_date", "Due date"),
            ("field_done_ratio", "% Done"),
            ("field_estimated_hours", "Estimated time"),
            ("field_is_private", "Private"),
            ("label_attachment", "File"),
        ];
        Self {
            catalog: entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.catalog.insert(key.into(), value.into());
        self
    }
}

impl Default for StaticTranslator {
    fn default() -> Self {
        Self::english()
    }
}

impl Translator for StaticTranslator {
    fn translate(&self, key: &str) -> String {
        self.catalog
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}
