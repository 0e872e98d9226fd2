//! Day-keyed persistence of the daily game
//!
//! - `snapshot`: the stored schema and its versioned migration
//! - `store`: where snapshot text lives (file or memory)
//! - `controller`: when to save, and whether a stored snapshot can be trusted

mod controller;
mod snapshot;
mod store;

pub use controller::PersistenceController;
pub use snapshot::{SNAPSHOT_VERSION, Snapshot, SnapshotError};
pub use store::{FileSnapshotStore, MemorySnapshotStore, SNAPSHOT_FILE, SnapshotStore, StoreError};
