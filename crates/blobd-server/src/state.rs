use std::sync::Arc;

use blobd_crypto::OidGenerator;
use blobd_store::{InMemoryObjectTable, ObjectTable};

use crate::config::ServerConfig;

/// Shared, cheaply cloneable handler state.
#[derive(Clone)]
pub struct AppState {
    pub table: Arc<dyn ObjectTable>,
    pub oids: Arc<dyn OidGenerator>,
    pub max_blob_size: usize,
}

impl AppState {
    /// Fresh empty table with the generator selected by `config`.
    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(
            Arc::new(InMemoryObjectTable::new()),
            Arc::from(config.oid_strategy.generator()),
            config.max_blob_size,
        )
    }

    pub fn new(table: Arc<dyn ObjectTable>, oids: Arc<dyn OidGenerator>, max_blob_size: usize) -> Self {
        Self {
            table,
            oids,
            max_blob_size,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("oid_strategy", &self.oids.strategy())
            .field("max_blob_size", &self.max_blob_size)
            .finish_non_exhaustive()
    }
}
