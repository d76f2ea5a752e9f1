use std::sync::Arc;
use std::time::Duration;

use serde_json::{Map, Value};
use tracing::info;

use super::timeout::bounded;
use crate::application::SnapshotStore;
use crate::domain::{normalize_id_filter, DomainError, UpdateOutcome};

/// Field-level partial update of a single snapshot.
pub struct UpdateSnapshotUseCase {
    store: Arc<dyn SnapshotStore>,
    timeout: Duration,
}

impl UpdateSnapshotUseCase {
    pub fn new(store: Arc<dyn SnapshotStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    pub async fn execute(
        &self,
        filter: Map<String, Value>,
        update: Map<String, Value>,
        upsert: bool,
    ) -> Result<UpdateOutcome, DomainError> {
        if filter.is_empty() || update.is_empty() {
            return Err(DomainError::invalid_input(
                "filter and update must be non-empty objects",
            ));
        }

        let filter = normalize_id_filter(filter);
        let outcome = bounded(
            "update_one",
            self.timeout,
            self.store.update_one(filter, update, upsert),
        )
        .await?;

        info!(
            matched = outcome.matched,
            modified = outcome.modified,
            upserted = outcome.upserted.is_some(),
            "Updated snapshot"
        );

        Ok(outcome)
    }
}
