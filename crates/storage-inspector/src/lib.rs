pub mod server;

pub mod browser;
pub mod entry;
pub mod error;
pub mod host;
pub mod render;
pub mod search;
pub mod settings;
pub mod storage;
pub mod view;

#[cfg(test)]
pub(crate) mod test_support;

pub use crate::browser::BrowserBridge;
pub use crate::error::{EvaluationError, InspectorError, InspectorResult};
pub use crate::host::{HostBridge, SharedHostBridge};
pub use crate::storage::{RemoteStorageAccessor, StorageKind, StorageSnapshot};
pub use crate::view::StorageViewController;
