use std::sync::Arc;

use crate::config::Config;
use crate::store::{StoreError, Stores};

/// Shared per-request context. The store handles are injected here rather
/// than held as process globals so handlers stay testable without a live
/// external service.
#[derive(Clone)]
pub struct AppState {
    pub cfg: Config,
    pub stores: Arc<Stores>,
}

impl AppState {
    pub fn new(cfg: Config) -> Result<Self, StoreError> {
        let stores = Arc::new(Stores::new(&cfg)?);
        Ok(Self { cfg, stores })
    }

    /// State backed entirely by in-memory stores.
    #[cfg(feature = "sim")]
    pub fn in_memory(cfg: Config) -> Self {
        let bucket = cfg.uploads.bucket.clone();
        Self {
            cfg,
            stores: Arc::new(Stores::in_memory(&bucket)),
        }
    }
}
