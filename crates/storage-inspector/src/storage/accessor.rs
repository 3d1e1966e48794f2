use serde_json::Value;

use super::script;
use super::{StorageCounts, StorageKind, StorageSnapshot};
use crate::error::EvaluationError;
use crate::host::SharedHostBridge;

/// Typed read/write operations against the inspected page's storages.
///
/// Every call is a single remote evaluation. Failures are returned as-is;
/// nothing here retries.
#[derive(Clone)]
pub struct RemoteStorageAccessor {
    host: SharedHostBridge,
}

impl RemoteStorageAccessor {
    pub fn new(host: SharedHostBridge) -> Self {
        Self { host }
    }

    pub async fn fetch_counts(&self) -> Result<StorageCounts, EvaluationError> {
        let value = self.host.execute_remote_script(&script::fetch_counts()).await?;
        StorageCounts::from_value(&value)
    }

    pub async fn fetch_all(&self, kind: StorageKind) -> Result<StorageSnapshot, EvaluationError> {
        let value = self
            .host
            .execute_remote_script(&script::fetch_all(kind))
            .await?;
        let snapshot = StorageSnapshot::from_value(value)?;
        tracing::debug!(storage = %kind, entries = snapshot.len(), "fetched storage snapshot");
        Ok(snapshot)
    }

    pub async fn remove(&self, kind: StorageKind, key: &str) -> Result<(), EvaluationError> {
        self.run(&script::remove(kind, key)).await
    }

    pub async fn clear(&self, kind: StorageKind) -> Result<(), EvaluationError> {
        self.run(&script::clear(kind)).await
    }

    async fn run(&self, source: &str) -> Result<(), EvaluationError> {
        let _: Value = self.host.execute_remote_script(source).await?;
        Ok(())
    }
}
