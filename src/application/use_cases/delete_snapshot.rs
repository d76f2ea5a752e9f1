use std::sync::Arc;
use std::time::Duration;

use serde_json::{Map, Value};
use tracing::info;

use super::timeout::bounded;
use crate::application::SnapshotStore;
use crate::domain::{normalize_id_filter, DeleteOutcome, DomainError};

pub struct DeleteSnapshotUseCase {
    store: Arc<dyn SnapshotStore>,
    timeout: Duration,
}

impl DeleteSnapshotUseCase {
    pub fn new(store: Arc<dyn SnapshotStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    pub async fn execute(&self, filter: Map<String, Value>) -> Result<DeleteOutcome, DomainError> {
        if filter.is_empty() {
            return Err(DomainError::invalid_input("filter must be a non-empty object"));
        }

        let filter = normalize_id_filter(filter);
        let outcome = bounded("delete_one", self.timeout, self.store.delete_one(filter)).await?;
        info!("Deleted {} snapshot(s)", outcome.deleted);

        Ok(outcome)
    }
}
