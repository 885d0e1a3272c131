//! The external managed store boundary.
//!
//! All persistence is delegated to a managed table/blob service; this
//! module only defines the client seam. Rows cross the boundary as
//! `serde_json::Value` and are decoded into domain types by callers,
//! mirroring the generic table API the managed service exposes.

pub mod rest;

#[cfg(feature = "sim")]
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::config::Config;

/// Table names in the managed store.
pub const ASSETS_TABLE: &str = "infrastructure_assets";
pub const RENEWABLES_TABLE: &str = "renewable_sources";
pub const DEMAND_TABLE: &str = "demand_centers";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("store returned HTTP {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("store row decode failed: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid row: {0}")]
    InvalidRow(&'static str),

    #[error("store configuration invalid: {0}")]
    Config(String),
}

/// Generic table access against the managed store. Insert/update/delete
/// return the number of rows the store reports as affected.
#[async_trait]
pub trait TableStore: Send + Sync {
    async fn select(&self, table: &str, columns: &str) -> Result<Vec<Value>, StoreError>;
    async fn select_by_id(&self, table: &str, id: &str) -> Result<Option<Value>, StoreError>;
    async fn insert(&self, table: &str, row: Value) -> Result<u64, StoreError>;
    async fn update(&self, table: &str, id: &str, row: Value) -> Result<u64, StoreError>;
    async fn delete(&self, table: &str, id: &str) -> Result<u64, StoreError>;
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Blob bucket access. `upload` returns the public URL of the stored object.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StoreError>;
}

/// Store handles injected into request handlers.
pub struct Stores {
    pub tables: Arc<dyn TableStore>,
    pub blobs: Arc<dyn BlobStore>,
}

impl Stores {
    pub fn new(cfg: &Config) -> Result<Self, StoreError> {
        match cfg.store.provider.as_str() {
            "rest" => {
                let tables = rest::RestTableStore::new(&cfg.store)?;
                let blobs = rest::RestBlobStore::new(&cfg.store, &cfg.uploads.bucket)?;
                Ok(Self {
                    tables: Arc::new(tables),
                    blobs: Arc::new(blobs),
                })
            }
            #[cfg(feature = "sim")]
            "memory" => Ok(Self::in_memory(&cfg.uploads.bucket)),
            other => Err(StoreError::Config(format!(
                "unknown store provider '{other}'"
            ))),
        }
    }

    #[cfg(feature = "sim")]
    pub fn in_memory(bucket: &str) -> Self {
        Self {
            tables: Arc::new(memory::MemoryTableStore::default()),
            blobs: Arc::new(memory::MemoryBlobStore::new(bucket)),
        }
    }
}
