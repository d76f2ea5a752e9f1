pub mod application;
pub mod connector;
pub mod domain;

pub use application::{
    DeleteSnapshotUseCase, InsertSnapshotUseCase, ListSnapshotsUseCase, LookupWinloseUseCase,
    SnapshotStore, SnapshotStoreFactory, StoreConnector, UpdateSnapshotUseCase,
};

pub use connector::{
    build_router, ApiError, ConnectionSettings, Container, ContainerConfig, InMemorySnapshotStore,
    InMemoryStoreFactory, MongoSnapshotStore, MongoStoreFactory, OperationTimeouts,
};

pub use domain::{
    build_lookup_filter, normalize_id_filter, resolve_record, DeleteOutcome, DomainError, Filter,
    InsertOutcome, LookupRequest, SnapshotData, SnapshotDocument, SnapshotRecord, UpdateOutcome,
    WinloseSummary,
};
