//! Sled Persistence - 项目快照存储

mod snapshot_store;

pub use snapshot_store::{SledSnapshotStore, SledStoreConfig};
