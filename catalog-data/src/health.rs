use catalog_core::{HealthIndicator, HealthStatus};

use crate::store::DocumentStore;

/// Reports DOWN once the store has been closed.
pub struct StoreHealth {
    store: DocumentStore,
}

impl StoreHealth {
    pub fn new(store: DocumentStore) -> Self {
        Self { store }
    }
}

impl HealthIndicator for StoreHealth {
    fn name(&self) -> &str {
        "document_store"
    }

    async fn check(&self) -> HealthStatus {
        if self.store.is_closed() {
            HealthStatus::Down("store closed".to_string())
        } else {
            HealthStatus::Up
        }
    }
}
