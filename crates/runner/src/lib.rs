//! Host side of the lock: an in-memory transaction context, snapshot files,
//! and witness fixtures.
pub mod config;
pub mod fixtures;
pub mod snapshot;

pub use config::{FormatName, SnapshotFile};
pub use snapshot::TxSnapshot;
