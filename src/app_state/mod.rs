use std::{sync::Arc, time::Instant};

use crate::domain::MappingStore;

pub type MappingStoreType = Arc<dyn MappingStore + Send + Sync>;

#[derive(Clone)]
pub struct AppState {
    pub mapping_store: MappingStoreType,
    /// Process start time, reported by the health endpoint.
    pub started_at: Instant,
}

impl AppState {
    pub fn new(mapping_store: MappingStoreType) -> Self {
        Self {
            mapping_store,
            started_at: Instant::now(),
        }
    }
}
