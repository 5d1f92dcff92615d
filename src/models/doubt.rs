use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::Date;
use utoipa::ToSchema;

use super::Document;
use crate::store::Collection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum DoubtStatus {
    Open,
    #[serde(rename = "In Progress")]
    InProgress,
    Resolved,
}

/// A question raised by a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Doubt {
    pub id: String,
    pub student_id: String,
    pub subject: String,
    #[serde(default)]
    pub chapter_no: Option<u32>,
    pub question: String,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(with = "super::iso_date")]
    pub date_raised: Date,
    pub status: DoubtStatus,
    #[serde(default)]
    pub resolution: Option<String>,
    /// Fields not modelled here, written back untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Document for Doubt {
    const COLLECTION: Collection = Collection::Doubts;

    fn id(&self) -> &str {
        &self.id
    }
}
