mod delete_snapshot;
mod insert_snapshot;
mod list_snapshots;
mod lookup_winlose;
mod timeout;
mod update_snapshot;

pub use delete_snapshot::*;
pub use insert_snapshot::*;
pub use list_snapshots::*;
pub use lookup_winlose::*;
pub use update_snapshot::*;
