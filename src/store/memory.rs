use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::bail;
use dashmap::{DashMap, DashSet};
use serde_json::{Map, Value};

use super::{Collection, DocumentStore, StoredDocument};

/// Process-local store, used for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: DashMap<Collection, Vec<StoredDocument>>,
    offline: AtomicBool,
    rejected: DashSet<(Collection, String)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// While offline every call fails, as an unreachable remote would.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Writes to this one document fail until [`MemoryStore::accept_writes`] is called.
    pub fn reject_writes(&self, collection: Collection, id: &str) {
        self.rejected.insert((collection, id.to_string()));
    }

    pub fn accept_writes(&self, collection: Collection, id: &str) {
        self.rejected.remove(&(collection, id.to_string()));
    }

    /// Current body of one document, bypassing the offline switch.
    pub fn peek(&self, collection: Collection, id: &str) -> Option<Value> {
        let docs = self.collections.get(&collection)?;
        docs.iter().find(|d| d.id == id).map(|d| d.data.clone())
    }

    pub fn len(&self, collection: Collection) -> usize {
        self.collections.get(&collection).map_or(0, |docs| docs.len())
    }

    fn check_online(&self) -> anyhow::Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            bail!("document store is unreachable");
        }
        Ok(())
    }

    fn check_writable(&self, collection: Collection, id: &str) -> anyhow::Result<()> {
        self.check_online()?;
        if self.rejected.contains(&(collection, id.to_string())) {
            bail!("write to {collection}/{id} rejected");
        }
        Ok(())
    }
}

impl DocumentStore for MemoryStore {
    async fn get_all(&self, collection: Collection) -> anyhow::Result<Vec<StoredDocument>> {
        self.check_online()?;
        Ok(self
            .collections
            .get(&collection)
            .map(|docs| docs.value().clone())
            .unwrap_or_default())
    }

    async fn set(&self, collection: Collection, id: &str, data: Value) -> anyhow::Result<()> {
        self.check_writable(collection, id)?;
        let mut docs = self.collections.entry(collection).or_default();
        match docs.iter_mut().find(|d| d.id == id) {
            Some(doc) => doc.data = data,
            None => docs.push(StoredDocument {
                id: id.to_string(),
                data,
            }),
        }
        Ok(())
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        fields: Map<String, Value>,
    ) -> anyhow::Result<()> {
        self.check_writable(collection, id)?;
        let mut docs = self.collections.entry(collection).or_default();
        let Some(doc) = docs.iter_mut().find(|d| d.id == id) else {
            bail!("no document {id} in {collection}");
        };
        let Value::Object(body) = &mut doc.data else {
            bail!("document {id} in {collection} is not an object");
        };
        body.extend(fields);
        Ok(())
    }

    async fn delete(&self, collection: Collection, id: &str) -> anyhow::Result<()> {
        self.check_writable(collection, id)?;
        if let Some(mut docs) = self.collections.get_mut(&collection) {
            docs.retain(|d| d.id != id);
        }
        Ok(())
    }
}
