mod envelope;
pub mod delete_snapshot_controller;
pub mod insert_snapshot_controller;
pub mod snapshot_all_controller;
pub mod update_snapshot_controller;
pub mod winlose_controller;

pub use delete_snapshot_controller::DeleteSnapshotController;
pub use envelope::{Envelope, SUCCESS_CODE, SUCCESS_MSG};
pub use insert_snapshot_controller::InsertSnapshotController;
pub use snapshot_all_controller::SnapshotAllController;
pub use update_snapshot_controller::UpdateSnapshotController;
pub use winlose_controller::WinloseController;
