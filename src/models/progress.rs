use serde::{Deserialize, Serialize};
use time::Date;
use utoipa::ToSchema;

use super::Document;
use crate::store::Collection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Start,
    Complete,
    Revision,
    Test,
}

/// A dated syllabus event recorded against one chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    #[serde(with = "super::iso_date")]
    pub date: Date,
}

/// Progress of one student through one chapter of one subject.
///
/// Never persisted with an empty `entries` list, the document is deleted instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChapterProgress {
    pub id: String,
    pub student_id: String,
    pub subject: String,
    pub chapter_no: u32,
    pub chapter_name: String,
    #[serde(default)]
    pub entries: Vec<ProgressEntry>,
}

impl ChapterProgress {
    pub fn new(
        student_id: impl Into<String>,
        subject: impl Into<String>,
        chapter_no: u32,
        chapter_name: impl Into<String>,
    ) -> Self {
        let student_id = student_id.into();
        let subject = subject.into();
        Self {
            id: Self::compose_id(&student_id, &subject, chapter_no),
            student_id,
            subject,
            chapter_no,
            chapter_name: chapter_name.into(),
            entries: vec![],
        }
    }

    /// Id shared by every save of the same (student, subject, chapter).
    pub fn compose_id(student_id: &str, subject: &str, chapter_no: u32) -> String {
        format!("{student_id}_{subject}_{chapter_no}")
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Document for ChapterProgress {
    const COLLECTION: Collection = Collection::ChapterProgress;

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_type_tag() {
        let mut progress = ChapterProgress::new("s1", "Physics", 4, "Motion");
        assert_eq!(progress.id, "s1_Physics_4");
        progress.entries.push(ProgressEntry {
            id: "e1".to_string(),
            kind: EntryKind::Start,
            date: time::macros::date!(2025 - 01 - 20),
        });
        let value = serde_json::to_value(&progress).unwrap();
        assert_eq!(value["entries"][0]["type"], "start");
        assert_eq!(value["entries"][0]["date"], "2025-01-20");
        assert_eq!(value["chapterNo"], 4);
    }
}
