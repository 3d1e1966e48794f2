//! Scripted in-memory host bridge for tests.
//!
//! Recognizes exactly the scripts built by [`crate::storage::script`] and
//! answers them from two in-memory storages.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::sync::Notify;

use crate::error::EvaluationError;
use crate::host::HostBridge;
use crate::storage::{script, StorageKind};

#[derive(Default)]
struct FakeState {
    local: Vec<(String, String)>,
    session: Vec<(String, String)>,
    failure: Option<EvaluationError>,
    script_failures: HashMap<String, EvaluationError>,
    paused: Option<Arc<Notify>>,
}

impl FakeState {
    fn storage_mut(&mut self, kind: StorageKind) -> &mut Vec<(String, String)> {
        match kind {
            StorageKind::Local => &mut self.local,
            StorageKind::Session => &mut self.session,
        }
    }
}

#[derive(Default)]
pub(crate) struct FakeHost {
    state: Mutex<FakeState>,
    calls: AtomicUsize,
}

impl FakeHost {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set_local(&self, pairs: &[(&str, &str)]) {
        self.state.lock().local = to_owned(pairs);
    }

    pub(crate) fn set_session(&self, pairs: &[(&str, &str)]) {
        self.state.lock().session = to_owned(pairs);
    }

    pub(crate) fn local_keys(&self) -> Vec<String> {
        self.state.lock().local.iter().map(|(k, _)| k.clone()).collect()
    }

    /// Every following evaluation fails with `error` until [`FakeHost::recover`].
    pub(crate) fn fail_with(&self, error: EvaluationError) {
        self.state.lock().failure = Some(error);
    }

    /// Only evaluations of exactly `source` fail, until [`FakeHost::recover`].
    pub(crate) fn fail_script(&self, source: String, error: EvaluationError) {
        self.state.lock().script_failures.insert(source, error);
    }

    pub(crate) fn recover(&self) {
        let mut state = self.state.lock();
        state.failure = None;
        state.script_failures.clear();
    }

    /// The next full-snapshot read waits until the returned handle is notified,
    /// then reads whatever the storage holds at that moment.
    pub(crate) fn pause_next_fetch(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.state.lock().paused = Some(notify.clone());
        notify
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

fn to_owned(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[async_trait]
impl HostBridge for FakeHost {
    async fn execute_remote_script(&self, source: &str) -> Result<Value, EvaluationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let failure = {
            let state = self.state.lock();
            state
                .failure
                .clone()
                .or_else(|| state.script_failures.get(source).cloned())
        };
        if let Some(error) = failure {
            return Err(error);
        }

        if source == script::fetch_counts() {
            let state = self.state.lock();
            return Ok(json!({ "local": state.local.len(), "session": state.session.len() }));
        }

        for kind in [StorageKind::Local, StorageKind::Session] {
            if source == script::fetch_all(kind) {
                let paused = self.state.lock().paused.take();
                if let Some(notify) = paused {
                    notify.notified().await;
                }
                let mut state = self.state.lock();
                let pairs = state
                    .storage_mut(kind)
                    .iter()
                    .map(|(k, v)| json!([k, v]))
                    .collect::<Vec<_>>();
                return Ok(Value::Array(pairs));
            }
            if source == script::clear(kind) {
                self.state.lock().storage_mut(kind).clear();
                return Ok(Value::Null);
            }
            let prefix = format!("window.{}.removeItem(", kind.global_name());
            if let Some(literal) = source
                .strip_prefix(&prefix)
                .and_then(|rest| rest.strip_suffix(')'))
            {
                let key: String = serde_json::from_str(literal)
                    .map_err(|e| EvaluationError::MalformedResult(e.to_string()))?;
                self.state.lock().storage_mut(kind).retain(|(k, _)| *k != key);
                return Ok(Value::Null);
            }
        }

        Err(EvaluationError::from_exception(json!({
            "isException": true,
            "value": format!("unrecognized script: {source}"),
        })))
    }
}
