use anyhow::bail;
use serde_json::{Map, Value};
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use time::OffsetDateTime;

use super::{Collection, DocumentStore, StoredDocument};

/// Document collections kept as JSON bodies in a single SQLite table.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    database: SqlitePool,
}

impl SqliteStore {
    pub async fn connect(url: &str) -> anyhow::Result<Self> {
        let database = SqlitePool::connect(url).await?;
        Self::init(database).await
    }

    /// Private in-memory database, one connection so every query sees the same data.
    pub async fn memory() -> anyhow::Result<Self> {
        let database = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;
        Self::init(database).await
    }

    async fn init(database: SqlitePool) -> anyhow::Result<Self> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS document (
                collection TEXT NOT NULL,
                id TEXT NOT NULL,
                body TEXT NOT NULL,
                update_time TEXT NOT NULL,
                PRIMARY KEY (collection, id)
            )",
        )
        .execute(&database)
        .await?;
        Ok(Self { database })
    }
}

impl DocumentStore for SqliteStore {
    async fn get_all(&self, collection: Collection) -> anyhow::Result<Vec<StoredDocument>> {
        let rows: Vec<(String, String)> = sqlx::query_as(
            "SELECT id, body FROM document WHERE collection = ? ORDER BY rowid",
        )
        .bind(collection.as_str())
        .fetch_all(&self.database)
        .await?;
        let mut documents = Vec::with_capacity(rows.len());
        for (id, body) in rows {
            let data = serde_json::from_str(&body)?;
            documents.push(StoredDocument { id, data });
        }
        Ok(documents)
    }

    async fn set(&self, collection: Collection, id: &str, data: Value) -> anyhow::Result<()> {
        let body = serde_json::to_string(&data)?;
        // upsert keeps the rowid, so replaced documents hold their position
        sqlx::query(
            "INSERT INTO document (collection, id, body, update_time) VALUES (?, ?, ?, ?)
             ON CONFLICT (collection, id) DO UPDATE SET body = excluded.body, update_time = excluded.update_time",
        )
        .bind(collection.as_str())
        .bind(id)
        .bind(body)
        .bind(OffsetDateTime::now_utc())
        .execute(&self.database)
        .await?;
        Ok(())
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        fields: Map<String, Value>,
    ) -> anyhow::Result<()> {
        let patch = serde_json::to_string(&fields)?;
        let result = sqlx::query(
            "UPDATE document SET body = json_patch(body, ?), update_time = ? WHERE collection = ? AND id = ?",
        )
        .bind(patch)
        .bind(OffsetDateTime::now_utc())
        .bind(collection.as_str())
        .bind(id)
        .execute(&self.database)
        .await?;
        if result.rows_affected() == 0 {
            bail!("no document {id} in {collection}");
        }
        Ok(())
    }

    async fn delete(&self, collection: Collection, id: &str) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM document WHERE collection = ? AND id = ?")
            .bind(collection.as_str())
            .bind(id)
            .execute(&self.database)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn test_sqlite_round_trip_keeps_order() {
        let store = SqliteStore::memory().await.unwrap();
        store.set(Collection::WorkItems, "w1", json!({"title": "a"})).await.unwrap();
        store.set(Collection::WorkItems, "w2", json!({"title": "b"})).await.unwrap();
        store.set(Collection::WorkItems, "w1", json!({"title": "c"})).await.unwrap();
        store.set(Collection::Doubts, "w1", json!({"question": "?"})).await.unwrap();

        let docs = store.get_all(Collection::WorkItems).await.unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id, "w1");
        assert_eq!(docs[0].data, json!({"title": "c"}));
        assert_eq!(docs[1].id, "w2");

        store.delete(Collection::WorkItems, "w1").await.unwrap();
        store.delete(Collection::WorkItems, "missing").await.unwrap();
        assert_eq!(store.get_all(Collection::WorkItems).await.unwrap().len(), 1);
        assert_eq!(store.get_all(Collection::Doubts).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_sqlite_partial_update() {
        let store = SqliteStore::memory().await.unwrap();
        store
            .set(Collection::Students, "s1", json!({"id": "s1", "name": "Asha", "isArchived": false}))
            .await
            .unwrap();
        let mut fields = Map::new();
        fields.insert("isArchived".to_string(), json!(true));
        store.update(Collection::Students, "s1", fields.clone()).await.unwrap();
        let docs = store.get_all(Collection::Students).await.unwrap();
        assert_eq!(docs[0].data, json!({"id": "s1", "name": "Asha", "isArchived": true}));

        assert!(store.update(Collection::Students, "s2", fields).await.is_err());
    }

    #[tokio::test]
    async fn test_sqlite_file_database() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("desk.db").display());
        {
            let store = SqliteStore::connect(&url).await.unwrap();
            store.set(Collection::Doubts, "d1", json!({"id": "d1"})).await.unwrap();
        }
        let store = SqliteStore::connect(&url).await.unwrap();
        assert_eq!(store.get_all(Collection::Doubts).await.unwrap().len(), 1);
    }
}
