use std::sync::Arc;
use std::time::Duration;

use serde_json::{Map, Value};
use tracing::info;

use super::timeout::bounded;
use crate::application::SnapshotStore;
use crate::domain::{DomainError, InsertOutcome};

/// Stores a caller-supplied document verbatim.
pub struct InsertSnapshotUseCase {
    store: Arc<dyn SnapshotStore>,
    timeout: Duration,
}

impl InsertSnapshotUseCase {
    pub fn new(store: Arc<dyn SnapshotStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    pub async fn execute(&self, document: Map<String, Value>) -> Result<InsertOutcome, DomainError> {
        if document.is_empty() {
            return Err(DomainError::invalid_input("Document must not be empty"));
        }

        let outcome = bounded("insert", self.timeout, self.store.insert(document)).await?;
        info!("Inserted snapshot {}", outcome.inserted_id);

        Ok(outcome)
    }
}
