use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::domain::{DeleteOutcome, DomainError, Filter, InsertOutcome, UpdateOutcome};

/// Operations on the snapshot collection.
///
/// Documents cross this boundary as JSON objects. Identifiers are rendered as
/// hex strings on the way out; filters coming in carry `_id` in the
/// `{"$oid": ...}` form produced by [`crate::domain::normalize_id_filter`].
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    async fn find_one(&self, filter: &Filter) -> Result<Option<Value>, DomainError>;

    async fn find_all(&self) -> Result<Vec<Value>, DomainError>;

    async fn insert(&self, document: Map<String, Value>) -> Result<InsertOutcome, DomainError>;

    /// Apply `set` as a field-level merge to the first document matching
    /// `filter`, creating one when nothing matches and `upsert` is true.
    async fn update_one(
        &self,
        filter: Map<String, Value>,
        set: Map<String, Value>,
        upsert: bool,
    ) -> Result<UpdateOutcome, DomainError>;

    /// Delete at most one document matching `filter`.
    async fn delete_one(&self, filter: Map<String, Value>) -> Result<DeleteOutcome, DomainError>;

    /// Release the underlying session. Default is a no-op.
    async fn shutdown(&self) {}
}

/// Opens a store. Called at most once per [`crate::application::StoreConnector`].
#[async_trait]
pub trait SnapshotStoreFactory: Send + Sync {
    async fn connect(&self) -> Result<Arc<dyn SnapshotStore>, DomainError>;
}
