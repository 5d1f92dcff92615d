use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Document;
use crate::store::Collection;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubjectChapter {
    pub no: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubjectData {
    pub name: String,
    #[serde(default)]
    pub chapters: Vec<SubjectChapter>,
}

/// All subjects of one student, stored under the student's id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentSubjects {
    pub student_id: String,
    #[serde(default)]
    pub subjects: Vec<SubjectData>,
}

impl Document for StudentSubjects {
    const COLLECTION: Collection = Collection::StudentSubjects;
    const ID_FIELD: &'static str = "studentId";

    fn id(&self) -> &str {
        &self.student_id
    }
}
