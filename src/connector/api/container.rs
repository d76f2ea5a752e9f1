use std::sync::Arc;

use tracing::debug;

use crate::application::{
    DeleteSnapshotUseCase, InsertSnapshotUseCase, ListSnapshotsUseCase, LookupWinloseUseCase,
    SnapshotStore, SnapshotStoreFactory, StoreConnector, UpdateSnapshotUseCase,
};
use crate::connector::config::{ConnectionSettings, OperationTimeouts};
use crate::connector::{InMemoryStoreFactory, MongoStoreFactory};
use crate::domain::DomainError;

#[derive(Default)]
pub struct ContainerConfig {
    pub connection: ConnectionSettings,
    pub timeouts: OperationTimeouts,
    /// Serve from a process-local store instead of MongoDB.
    pub memory_storage: bool,
}

/// Shared state behind every request: the lazily opened store and the
/// operation timeouts.
pub struct Container {
    connector: StoreConnector,
    timeouts: OperationTimeouts,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Self {
        let factory: Arc<dyn SnapshotStoreFactory> = if config.memory_storage {
            debug!("Using in-memory snapshot storage");
            Arc::new(InMemoryStoreFactory::default())
        } else {
            debug!(
                "Using MongoDB snapshot storage ({}.{})",
                config.connection.database(),
                config.connection.collection()
            );
            Arc::new(MongoStoreFactory::new(
                config.connection,
                config.timeouts.connect,
            ))
        };

        Self::with_connector(StoreConnector::new(factory), config.timeouts)
    }

    pub fn with_connector(connector: StoreConnector, timeouts: OperationTimeouts) -> Self {
        Self {
            connector,
            timeouts,
        }
    }

    /// A container over an already open store. Used by tests.
    pub fn with_store(store: Arc<dyn SnapshotStore>) -> Self {
        Self::with_connector(
            StoreConnector::with_store(store),
            OperationTimeouts::default(),
        )
    }

    async fn store(&self) -> Result<Arc<dyn SnapshotStore>, DomainError> {
        self.connector.store().await
    }

    pub async fn lookup_use_case(&self) -> Result<LookupWinloseUseCase, DomainError> {
        Ok(LookupWinloseUseCase::new(
            self.store().await?,
            self.timeouts.point,
        ))
    }

    pub async fn list_use_case(&self) -> Result<ListSnapshotsUseCase, DomainError> {
        Ok(ListSnapshotsUseCase::new(
            self.store().await?,
            self.timeouts.scan,
        ))
    }

    pub async fn insert_use_case(&self) -> Result<InsertSnapshotUseCase, DomainError> {
        Ok(InsertSnapshotUseCase::new(
            self.store().await?,
            self.timeouts.point,
        ))
    }

    pub async fn update_use_case(&self) -> Result<UpdateSnapshotUseCase, DomainError> {
        Ok(UpdateSnapshotUseCase::new(
            self.store().await?,
            self.timeouts.point,
        ))
    }

    pub async fn delete_use_case(&self) -> Result<DeleteSnapshotUseCase, DomainError> {
        Ok(DeleteSnapshotUseCase::new(
            self.store().await?,
            self.timeouts.point,
        ))
    }

    pub async fn shutdown(&self) {
        self.connector.shutdown().await;
    }
}
