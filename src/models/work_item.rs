use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::Date;
use utoipa::ToSchema;

use super::Document;
use crate::store::Collection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum WorkStatus {
    Assign,
    #[serde(rename = "In Progress")]
    InProgress,
    Done,
}

impl WorkStatus {
    pub fn is_complete(self) -> bool {
        matches!(self, WorkStatus::Done)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// Where a work item came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum WorkSource {
    Syllabus,
    Manual,
    Doubt,
}

/// A task assigned to a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkItem {
    pub id: String,
    pub student_id: String,
    pub title: String,
    pub subject: String,
    pub chapter_no: u32,
    pub chapter_name: String,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(with = "super::iso_date")]
    pub due_date: Date,
    pub status: WorkStatus,
    pub priority: Priority,
    #[serde(default)]
    pub links: Option<Vec<String>>,
    #[serde(default)]
    pub files: Option<Vec<String>>,
    #[serde(default)]
    pub mentor_note: Option<String>,
    #[serde(with = "super::iso_date")]
    pub date_created: Date,
    pub source: WorkSource,
    /// Set when `source` is [`WorkSource::Doubt`]
    #[serde(default)]
    pub linked_doubt_id: Option<String>,
    /// Fields not modelled here, written back untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WorkItem {
    pub fn is_linked_to(&self, doubt_id: &str) -> bool {
        self.linked_doubt_id.as_deref() == Some(doubt_id)
    }
}

impl Document for WorkItem {
    const COLLECTION: Collection = Collection::WorkItems;

    fn id(&self) -> &str {
        &self.id
    }
}
