use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::{mpsc, Mutex, Notify, RwLock};

use crate::error::EvaluationError;
use crate::host::HostBridge;

/// Manages the WebSocket connection to the devtools extension and
/// request/response matching for remote script evaluation.
pub struct BrowserBridge {
    connection: RwLock<ConnectionState>,
    pending: Mutex<HashMap<String, PendingRequest>>,
    timeout: Option<Duration>,
}

struct ConnectionState {
    sender: Option<mpsc::UnboundedSender<String>>,
    generation: u64,
}

struct PendingRequest {
    result: Option<Result<Value, EvaluationError>>,
    notify: Arc<Notify>,
}

impl BrowserBridge {
    /// `timeout` of `None` waits for the extension indefinitely.
    pub fn new(timeout: Option<Duration>) -> Self {
        Self {
            connection: RwLock::new(ConnectionState {
                sender: None,
                generation: 0,
            }),
            pending: Mutex::new(HashMap::new()),
            timeout,
        }
    }

    /// Send a command to the extension and wait for its response.
    pub async fn send_command(&self, method: &str, params: Value) -> Result<Value, EvaluationError> {
        let id = uuid::Uuid::new_v4().to_string();
        let message = serde_json::json!({
            "id": id,
            "method": method,
            "params": params,
        });

        let notify = Arc::new(Notify::new());

        // Insert pending request first, then send.
        {
            let mut pending = self.pending.lock().await;
            pending.insert(
                id.clone(),
                PendingRequest {
                    result: None,
                    notify: notify.clone(),
                },
            );
        }

        {
            let conn = self.connection.read().await;
            let delivered = match &conn.sender {
                Some(sender) => {
                    let text = serde_json::to_string(&message).map_err(|e| {
                        EvaluationError::Host(format!("failed to serialize command: {e}"))
                    })?;
                    sender.send(text).is_ok()
                }
                None => false,
            };
            if !delivered {
                let mut pending = self.pending.lock().await;
                pending.remove(&id);
                return Err(EvaluationError::NotConnected);
            }
        }

        let timed_out = match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, notify.notified())
                .await
                .is_err(),
            None => {
                notify.notified().await;
                false
            }
        };

        let mut pending = self.pending.lock().await;
        match pending.remove(&id) {
            Some(_) if timed_out => {
                tracing::warn!("browser command '{method}' timed out");
                Err(EvaluationError::TimedOut)
            }
            Some(req) => req.result.unwrap_or(Err(EvaluationError::Cancelled)),
            None => Err(EvaluationError::Cancelled),
        }
    }

    /// Called when a new extension connects via WebSocket.
    /// Returns the generation ID for this connection.
    pub async fn on_connect(&self, sender: mpsc::UnboundedSender<String>) -> u64 {
        // Requests sent over the old connection will never be answered.
        self.fail_pending().await;

        let mut conn = self.connection.write().await;
        conn.generation += 1;
        conn.sender = Some(sender);
        let gen = conn.generation;
        tracing::info!("devtools extension connected (generation {gen})");
        gen
    }

    /// Called when the extension disconnects. Only clears the sender if the
    /// generation matches, so a late disconnect of an old socket leaves the
    /// current one alone.
    pub async fn on_disconnect(&self, generation: u64) {
        let mut conn = self.connection.write().await;
        if conn.generation == generation {
            conn.sender = None;
            tracing::info!("devtools extension disconnected (generation {generation})");
            drop(conn);
            self.fail_pending().await;
        }
    }

    /// Called when a text frame arrives from the extension.
    pub async fn on_message(&self, text: &str) {
        let msg: Value = match serde_json::from_str(text) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!("invalid message from devtools extension: {e}");
                return;
            }
        };

        let id = match msg.get("id").and_then(|v| v.as_str()) {
            Some(id) => id.to_string(),
            None => {
                tracing::warn!("devtools extension message missing 'id' field");
                return;
            }
        };

        let result = if let Some(exception) = msg.get("exception").filter(|v| !v.is_null()) {
            Err(EvaluationError::from_exception(exception.clone()))
        } else if let Some(error) = msg.get("error").filter(|v| !v.is_null()) {
            Err(EvaluationError::Host(
                error.as_str().unwrap_or("unknown extension error").to_string(),
            ))
        } else {
            Ok(msg.get("result").cloned().unwrap_or(Value::Null))
        };

        let mut pending = self.pending.lock().await;
        if let Some(req) = pending.get_mut(&id) {
            req.result = Some(result);
            req.notify.notify_one();
        } else {
            tracing::warn!("received response for unknown request id: {id}");
        }
    }

    /// Whether an extension is currently connected.
    pub async fn is_connected(&self) -> bool {
        let conn = self.connection.read().await;
        conn.sender.is_some()
    }

    pub async fn generation(&self) -> u64 {
        self.connection.read().await.generation
    }

    async fn fail_pending(&self) {
        let mut pending = self.pending.lock().await;
        for (_, req) in pending.drain() {
            req.notify.notify_one();
        }
    }
}

#[async_trait]
impl HostBridge for BrowserBridge {
    async fn execute_remote_script(&self, source: &str) -> Result<Value, EvaluationError> {
        self.send_command("eval", serde_json::json!({ "expression": source }))
            .await
    }
}
