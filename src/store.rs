pub mod memory;
pub mod sqlite;

use std::{fmt, future::Future};

use serde_json::{Map, Value};

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// The five document collections the desk keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Students,
    StudentSubjects,
    ChapterProgress,
    WorkItems,
    Doubts,
}

impl Collection {
    pub fn as_str(self) -> &'static str {
        match self {
            Collection::Students => "students",
            Collection::StudentSubjects => "studentSubjects",
            Collection::ChapterProgress => "chapterProgress",
            Collection::WorkItems => "workItems",
            Collection::Doubts => "doubts",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    GetAll,
    Set,
    Update,
    Delete,
}

impl fmt::Display for StoreOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            StoreOp::GetAll => "get all",
            StoreOp::Set => "set",
            StoreOp::Update => "update",
            StoreOp::Delete => "delete",
        };
        f.write_str(op)
    }
}

/// A fetched document with its id attached.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: String,
    pub data: Value,
}

/// Remote document database holding whole documents keyed by string id.
///
/// No query filtering happens at this boundary, callers fetch a collection
/// and filter locally.
pub trait DocumentStore: Send + Sync + 'static {
    /// Every document of the collection, in insertion order.
    fn get_all(
        &self,
        collection: Collection,
    ) -> impl Future<Output = anyhow::Result<Vec<StoredDocument>>> + Send;

    /// Create the document or replace it entirely.
    fn set(
        &self,
        collection: Collection,
        id: &str,
        data: Value,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;

    /// Merge top-level fields into an existing document. Fails when the document is missing.
    fn update(
        &self,
        collection: Collection,
        id: &str,
        fields: Map<String, Value>,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;

    /// Remove the document. Removing a missing id succeeds.
    fn delete(
        &self,
        collection: Collection,
        id: &str,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;
}
