use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use super::selection::{reconcile, Reconciliation, SelectionState};
use super::state::ViewState;
use crate::entry::Entry;
use crate::error::{EvaluationError, InspectorError, InspectorResult};
use crate::render::{PanelMessage, SharedRenderer, ValueView};
use crate::search::{highlights_for, SearchAction};
use crate::settings::{PanelPreferences, SharedSettings};
use crate::storage::{RemoteStorageAccessor, StorageKind};

/// How a refresh treats the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshMode {
    /// Re-select the previously shown key or its positional successor.
    Reload,
    /// Start over with nothing selected.
    Switch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Applied,
    /// A newer refresh was issued while this one was in flight; its result
    /// was dropped.
    Stale,
}

/// Orchestrates refreshes of the storage panel and keeps the selection
/// coherent across them.
///
/// Every refresh is stamped with a generation when issued. Only the most
/// recently issued refresh may replace the snapshot, so out-of-order
/// completions never show stale data.
pub struct StorageViewController {
    accessor: RemoteStorageAccessor,
    renderer: SharedRenderer,
    settings: SharedSettings,
    state: Mutex<ViewState>,
    generation: AtomicU64,
}

impl StorageViewController {
    /// Starts on the storage remembered in `settings`.
    pub fn new(
        accessor: RemoteStorageAccessor,
        renderer: SharedRenderer,
        settings: SharedSettings,
    ) -> Self {
        let preferences = PanelPreferences::load(settings.as_ref());
        Self {
            accessor,
            renderer,
            settings,
            state: Mutex::new(ViewState::new(preferences.storage)),
            generation: AtomicU64::new(0),
        }
    }

    pub fn storage(&self) -> StorageKind {
        self.state.lock().storage
    }

    pub fn selection(&self) -> SelectionState {
        self.state.lock().selection.clone()
    }

    pub fn keys(&self) -> Vec<String> {
        self.state.lock().keys().to_vec()
    }

    pub fn entry(&self, key: &str) -> Option<Entry> {
        self.state.lock().entry(key).cloned()
    }

    pub fn shown(&self) -> Option<ValueView> {
        self.state.lock().shown().cloned()
    }

    /// Fetches counts and a fresh snapshot of `storage_name`, replaces the
    /// current snapshot and re-renders the key list.
    ///
    /// On failure the rendered list and the selection are left as they were
    /// and a load error is shown.
    pub async fn retrieve(
        &self,
        storage_name: &str,
        mode: RefreshMode,
    ) -> InspectorResult<RefreshOutcome> {
        let storage = StorageKind::normalize(storage_name);
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(%storage, generation, ?mode, "refreshing storage");

        let (counts, snapshot) = tokio::join!(
            self.accessor.fetch_counts(),
            self.accessor.fetch_all(storage)
        );

        let mut state = self.state.lock();
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(%storage, generation, "discarding stale refresh");
            return Ok(RefreshOutcome::Stale);
        }

        match counts {
            Ok(counts) => {
                state.counts = Some(counts);
                self.renderer.render_counts(&counts);
            }
            Err(error) => tracing::warn!("failed to read storage counts: {error}"),
        }

        let snapshot = match snapshot {
            Ok(snapshot) => snapshot,
            Err(error) => {
                self.show_error(storage, &error);
                return Err(error.into());
            }
        };

        state.storage = storage;
        state.replace_snapshot(snapshot);
        self.renderer.render_key_list(storage, &state.key_list());

        match mode {
            RefreshMode::Reload => self.apply_reconciliation(&mut state),
            RefreshMode::Switch => {
                state.selection.reset();
                self.show_nothing(&state);
            }
        }
        Ok(RefreshOutcome::Applied)
    }

    /// Refreshes the current storage and restores the selection.
    pub async fn reload(&self) -> InspectorResult<RefreshOutcome> {
        let storage = self.storage();
        self.retrieve(storage.global_name(), RefreshMode::Reload).await
    }

    /// Switches to another storage. Always drops the selection.
    pub async fn switch_storage(&self, storage_name: &str) -> InspectorResult<RefreshOutcome> {
        let storage = StorageKind::normalize(storage_name);
        {
            let mut state = self.state.lock();
            state.storage = storage;
            self.clear_locked(&mut state, false);
        }
        if let Err(error) = PanelPreferences::save_storage(self.settings.as_ref(), storage) {
            tracing::warn!("failed to remember storage preference: {error}");
        }
        self.retrieve(storage.global_name(), RefreshMode::Switch).await
    }

    /// Empties the snapshot and the visible list right away. With
    /// `preserve_selection` a following reload can still restore the
    /// previously shown key.
    pub fn clear_view(&self, preserve_selection: bool) {
        let mut state = self.state.lock();
        self.clear_locked(&mut state, preserve_selection);
    }

    /// Shows the value and metadata of `key` and marks it active.
    pub fn show_key(&self, key: &str) -> InspectorResult<ValueView> {
        let mut state = self.state.lock();
        self.display(&mut state, key)
            .ok_or_else(|| InspectorError::KeyNotFound(key.to_string()))
    }

    /// Deletes `key` remotely, then reloads.
    pub async fn remove_key(&self, key: &str) -> InspectorResult<RefreshOutcome> {
        let storage = self.storage();
        if let Err(error) = self.accessor.remove(storage, key).await {
            self.show_error(storage, &error);
            return Err(error.into());
        }
        tracing::debug!(%storage, key, "removed key");
        self.reload().await
    }

    /// Deletes every key of the current storage remotely, then reloads.
    pub async fn clear_storage(&self) -> InspectorResult<RefreshOutcome> {
        let storage = self.storage();
        if let Err(error) = self.accessor.clear(storage).await {
            self.show_error(storage, &error);
            return Err(error.into());
        }
        tracing::debug!(%storage, "cleared storage");
        self.reload().await
    }

    /// Applies a devtools search event to the displayed value and returns
    /// the number of highlighted matches.
    pub fn search(&self, action: &str, keyword: &str) -> usize {
        let action = SearchAction::parse(action);
        let state = self.state.lock();
        let text = state.shown().map(|view| view.text.as_str()).unwrap_or("");
        let matches = highlights_for(&action, keyword, text);
        self.renderer.render_highlights(&matches);
        matches.len()
    }

    fn apply_reconciliation(&self, state: &mut ViewState) {
        match reconcile(&state.selection, state.keys()) {
            Reconciliation::Reselect { key, .. } => {
                self.display(state, &key);
            }
            Reconciliation::Cleared => {
                state.selection.reset();
                self.show_nothing(state);
            }
            Reconciliation::Unselected => self.show_nothing(state),
        }
    }

    fn display(&self, state: &mut ViewState, key: &str) -> Option<ValueView> {
        let view = state.show(key)?;
        self.renderer.render_value(Some(&view));
        self.renderer.set_active_key(Some(view.index));
        self.renderer.render_message(None);
        Some(view)
    }

    fn show_nothing(&self, state: &ViewState) {
        self.renderer.render_value(None);
        self.renderer.set_active_key(None);
        let message = PanelMessage::initial(state.storage, state.keys().is_empty());
        self.renderer.render_message(Some(&message));
    }

    fn clear_locked(&self, state: &mut ViewState, preserve_selection: bool) {
        state.clear(preserve_selection);
        self.renderer.render_key_list(state.storage, &[]);
        self.renderer.render_value(None);
        self.renderer.render_message(None);
    }

    fn show_error(&self, storage: StorageKind, error: &EvaluationError) {
        tracing::error!(%storage, "error loading storage: {error}");
        self.renderer.render_message(Some(&PanelMessage::LoadError {
            storage,
            detail: error.to_string(),
        }));
    }
}
