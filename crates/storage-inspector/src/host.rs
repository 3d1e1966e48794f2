use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::error::EvaluationError;

/// Runs script source inside the inspected page and returns its
/// JSON-decoded result.
#[async_trait]
pub trait HostBridge: Send + Sync {
    async fn execute_remote_script(&self, source: &str) -> Result<Value, EvaluationError>;
}

pub type SharedHostBridge = Arc<dyn HostBridge>;
