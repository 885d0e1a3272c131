//! In-process stand-in for the managed store, used for local development
//! and tests. Mimics the store's server-side behavior of assigning `id`
//! and `created_at` on insert.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{BlobStore, StoreError, TableStore};

#[derive(Default)]
pub struct MemoryTableStore {
    tables: RwLock<HashMap<String, Vec<Value>>>,
}

fn row_id(row: &Value) -> Option<&str> {
    row.get("id").and_then(|v| v.as_str())
}

#[async_trait]
impl TableStore for MemoryTableStore {
    // Projections are ignored: full rows come back. Callers tolerate extra
    // columns the same way they do against the real store.
    async fn select(&self, table: &str, _columns: &str) -> Result<Vec<Value>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.get(table).cloned().unwrap_or_default())
    }

    async fn select_by_id(&self, table: &str, id: &str) -> Result<Option<Value>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .get(table)
            .and_then(|rows| rows.iter().find(|r| row_id(r) == Some(id)).cloned()))
    }

    async fn insert(&self, table: &str, row: Value) -> Result<u64, StoreError> {
        let Value::Object(mut obj) = row else {
            return Err(StoreError::InvalidRow("row must be a JSON object"));
        };
        obj.insert("id".into(), Value::String(Uuid::new_v4().to_string()));
        obj.insert(
            "created_at".into(),
            Value::String(chrono::Utc::now().to_rfc3339()),
        );
        let mut tables = self.tables.write().await;
        tables
            .entry(table.to_string())
            .or_default()
            .push(Value::Object(obj));
        Ok(1)
    }

    async fn update(&self, table: &str, id: &str, row: Value) -> Result<u64, StoreError> {
        let Value::Object(new_fields) = row else {
            return Err(StoreError::InvalidRow("row must be a JSON object"));
        };
        let mut tables = self.tables.write().await;
        let Some(rows) = tables.get_mut(table) else {
            return Ok(0);
        };
        let mut updated = 0;
        for existing in rows.iter_mut().filter(|r| row_id(r) == Some(id)) {
            let mut replacement = new_fields.clone();
            if let Value::Object(old) = existing {
                // `id` and `created_at` are store-owned columns.
                for key in ["id", "created_at"] {
                    if let Some(v) = old.get(key) {
                        replacement.insert(key.into(), v.clone());
                    }
                }
            }
            *existing = Value::Object(replacement);
            updated += 1;
        }
        Ok(updated)
    }

    async fn delete(&self, table: &str, id: &str) -> Result<u64, StoreError> {
        let mut tables = self.tables.write().await;
        let Some(rows) = tables.get_mut(table) else {
            return Ok(0);
        };
        let before = rows.len();
        rows.retain(|r| row_id(r) != Some(id));
        Ok((before - rows.len()) as u64)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

pub struct MemoryBlobStore {
    bucket: String,
    objects: RwLock<HashMap<String, (String, Vec<u8>)>>,
}

impl MemoryBlobStore {
    pub fn new(bucket: &str) -> Self {
        Self {
            bucket: bucket.to_string(),
            objects: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StoreError> {
        let mut objects = self.objects.write().await;
        objects.insert(path.to_string(), (content_type.to_string(), bytes));
        Ok(format!("memory://{}/{}", self.bucket, path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn insert_assigns_id_and_created_at() {
        let store = MemoryTableStore::default();
        let n = store
            .insert("infrastructure_assets", json!({"name": "s", "lat": 1.0, "lng": 2.0}))
            .await
            .unwrap();
        assert_eq!(n, 1);

        let rows = store.select("infrastructure_assets", "*").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0]["id"].is_string());
        assert!(rows[0]["created_at"].is_string());
    }

    #[tokio::test]
    async fn update_replaces_fields_but_keeps_store_columns() {
        let store = MemoryTableStore::default();
        store
            .insert("demand_centers", json!({"name": "old", "demand_mw": 10.0}))
            .await
            .unwrap();
        let id = store.select("demand_centers", "*").await.unwrap()[0]["id"]
            .as_str()
            .unwrap()
            .to_string();

        let n = store
            .update("demand_centers", &id, json!({"name": "new", "demand_mw": null}))
            .await
            .unwrap();
        assert_eq!(n, 1);

        let row = store.select_by_id("demand_centers", &id).await.unwrap().unwrap();
        assert_eq!(row["name"], "new");
        assert!(row["demand_mw"].is_null());
        assert_eq!(row["id"], id.as_str());
        assert!(row["created_at"].is_string());
    }

    #[tokio::test]
    async fn delete_counts_removed_rows() {
        let store = MemoryTableStore::default();
        store.insert("t", json!({"name": "a"})).await.unwrap();
        let id = store.select("t", "*").await.unwrap()[0]["id"]
            .as_str()
            .unwrap()
            .to_string();

        assert_eq!(store.delete("t", &id).await.unwrap(), 1);
        assert_eq!(store.delete("t", &id).await.unwrap(), 0);
        assert_eq!(store.delete("missing", "x").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn non_object_row_is_rejected() {
        let store = MemoryTableStore::default();
        let err = store.insert("t", json!([1, 2])).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidRow(_)));
    }

    #[tokio::test]
    async fn blob_upload_yields_bucket_url() {
        let store = MemoryBlobStore::new("uploads");
        let url = store
            .upload("map.png", vec![1, 2, 3], "image/png")
            .await
            .unwrap();
        assert_eq!(url, "memory://uploads/map.png");
    }
}
