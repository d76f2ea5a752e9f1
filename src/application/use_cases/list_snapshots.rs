use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use super::timeout::bounded;
use crate::application::SnapshotStore;
use crate::domain::DomainError;

pub struct ListSnapshotsUseCase {
    store: Arc<dyn SnapshotStore>,
    timeout: Duration,
}

impl ListSnapshotsUseCase {
    pub fn new(store: Arc<dyn SnapshotStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    pub async fn execute(&self) -> Result<Vec<Value>, DomainError> {
        bounded("find_all", self.timeout, self.store.find_all()).await
    }
}
