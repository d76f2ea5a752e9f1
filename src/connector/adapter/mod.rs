mod in_memory_snapshot_store;
mod mongo_snapshot_store;

pub use in_memory_snapshot_store::*;
pub use mongo_snapshot_store::*;
