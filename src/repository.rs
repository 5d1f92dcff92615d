use std::{marker::PhantomData, sync::Arc};

use serde_json::{Map, Value};
use tracing::warn;

use crate::{
    error::{Error, Result},
    models::{ChapterProgress, Document, Doubt, Student, StudentSubjects, WorkItem},
    store::{DocumentStore, StoreOp},
};

/// Typed access to the collection holding `T`.
pub struct Repository<S, T> {
    store: Arc<S>,
    _document: PhantomData<fn() -> T>,
}

impl<S, T> Clone for Repository<S, T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _document: PhantomData,
        }
    }
}

impl<S: DocumentStore, T: Document> Repository<S, T> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            _document: PhantomData,
        }
    }

    /// Every document of the collection. Documents that no longer decode are skipped.
    pub async fn get_all(&self) -> Result<Vec<T>> {
        let documents = self
            .store
            .get_all(T::COLLECTION)
            .await
            .map_err(|e| Error::persistence(T::COLLECTION, StoreOp::GetAll, e))?;
        let mut entities = Vec::with_capacity(documents.len());
        for document in documents {
            let mut data = document.data;
            if let Value::Object(body) = &mut data {
                body.entry(T::ID_FIELD)
                    .or_insert_with(|| Value::String(document.id.clone()));
            }
            match serde_json::from_value::<T>(data) {
                Ok(entity) => entities.push(entity),
                Err(e) => warn!(
                    "skip undecodable document {}/{}: {}",
                    T::COLLECTION,
                    document.id,
                    e
                ),
            }
        }
        Ok(entities)
    }

    pub async fn upsert(&self, entity: &T) -> Result<()> {
        let data = serde_json::to_value(entity)
            .map_err(|e| Error::persistence(T::COLLECTION, StoreOp::Set, e))?;
        self.store
            .set(T::COLLECTION, entity.id(), data)
            .await
            .map_err(|e| Error::persistence(T::COLLECTION, StoreOp::Set, e))
    }

    pub async fn update_fields(&self, id: &str, fields: Map<String, Value>) -> Result<()> {
        self.store
            .update(T::COLLECTION, id, fields)
            .await
            .map_err(|e| Error::persistence(T::COLLECTION, StoreOp::Update, e))
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.store
            .delete(T::COLLECTION, id)
            .await
            .map_err(|e| Error::persistence(T::COLLECTION, StoreOp::Delete, e))
    }
}

impl<S: DocumentStore> Repository<S, Student> {
    /// Persist only the archival flag.
    pub async fn set_archived(&self, id: &str, is_archived: bool) -> Result<()> {
        let mut fields = Map::new();
        fields.insert("isArchived".to_string(), Value::Bool(is_archived));
        self.update_fields(id, fields).await
    }
}

/// One repository per entity kind, all sharing the same store.
pub struct Repositories<S> {
    pub students: Repository<S, Student>,
    pub subjects: Repository<S, StudentSubjects>,
    pub chapter_progress: Repository<S, ChapterProgress>,
    pub work_items: Repository<S, WorkItem>,
    pub doubts: Repository<S, Doubt>,
}

impl<S: DocumentStore> Repositories<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            students: Repository::new(store.clone()),
            subjects: Repository::new(store.clone()),
            chapter_progress: Repository::new(store.clone()),
            work_items: Repository::new(store.clone()),
            doubts: Repository::new(store),
        }
    }
}
