use serde::{Deserialize, Serialize};
use time::Date;
use utoipa::ToSchema;

use super::Document;
use crate::store::Collection;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub name: String,
    /// Examination board, e.g. "CBSE" or "ICSE"
    pub board: String,
    pub grade: u32,
    pub batch: String,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_phone: Option<String>,
    #[serde(
        default,
        with = "super::iso_date::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub joined_on: Option<Date>,
}

impl Student {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        board: impl Into<String>,
        grade: u32,
        batch: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            board: board.into(),
            grade,
            batch: batch.into(),
            is_archived: false,
            school: None,
            phone: None,
            parent_phone: None,
            joined_on: None,
        }
    }
}

impl Document for Student {
    const COLLECTION: Collection = Collection::Students;

    fn id(&self) -> &str {
        &self.id
    }
}
