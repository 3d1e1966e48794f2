//! Remote access to the inspected page's Web Storage.
//!
//! - [`StorageKind`]: which of the two storages an operation targets
//! - [`StorageSnapshot`]: ordered key/value pairs read at one point in time
//! - [`RemoteStorageAccessor`]: typed read/write operations over a [`HostBridge`](crate::host::HostBridge)

mod accessor;
mod kind;
pub mod script;
mod snapshot;

pub use accessor::RemoteStorageAccessor;
pub use kind::StorageKind;
pub use snapshot::{StorageCounts, StorageSnapshot};
