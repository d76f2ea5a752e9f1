use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{debug, error, info};

use crate::application::{SnapshotStore, SnapshotStoreFactory};
use crate::domain::DomainError;

type StoreResult = Result<Arc<dyn SnapshotStore>, DomainError>;

/// Lazily opened, process-wide store handle.
///
/// The first caller runs the factory; concurrent first callers wait for that
/// single attempt. The outcome, success or failure, is cached for the
/// lifetime of the connector and never retried.
pub struct StoreConnector {
    factory: Arc<dyn SnapshotStoreFactory>,
    cell: OnceCell<StoreResult>,
}

impl StoreConnector {
    pub fn new(factory: Arc<dyn SnapshotStoreFactory>) -> Self {
        Self {
            factory,
            cell: OnceCell::new(),
        }
    }

    /// A connector that is already initialized with `store`.
    pub fn with_store(store: Arc<dyn SnapshotStore>) -> Self {
        Self {
            factory: Arc::new(ReadyFactory(Arc::clone(&store))),
            cell: OnceCell::new_with(Some(Ok(store))),
        }
    }

    pub async fn store(&self) -> StoreResult {
        self.cell
            .get_or_init(|| async {
                debug!("Initializing snapshot store connection");
                let result = self.factory.connect().await;
                match &result {
                    Ok(_) => info!("Snapshot store connection established"),
                    Err(e) => error!("Snapshot store initialization failed: {}", e),
                }
                result
            })
            .await
            .clone()
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.initialized()
    }

    /// Close the store session if one was opened.
    pub async fn shutdown(&self) {
        if let Some(Ok(store)) = self.cell.get() {
            info!("Closing snapshot store connection");
            store.shutdown().await;
        }
    }
}

struct ReadyFactory(Arc<dyn SnapshotStore>);

#[async_trait::async_trait]
impl SnapshotStoreFactory for ReadyFactory {
    async fn connect(&self) -> StoreResult {
        Ok(Arc::clone(&self.0))
    }
}
