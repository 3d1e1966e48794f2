use parking_lot::RwLock;
use serde::Serialize;

use super::{count_label, KeyListItem, PanelMessage, Renderer, ValueView};
use crate::search::MatchRange;
use crate::storage::{StorageCounts, StorageKind};

/// Everything a panel front end needs to draw itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PanelView {
    pub storage: StorageKind,
    pub counts: StorageCounts,
    pub local_label: String,
    pub session_label: String,
    pub keys: Vec<KeyListItem>,
    pub key_list_markup: String,
    pub active_index: Option<usize>,
    pub value: Option<ValueView>,
    pub message: Option<PanelMessage>,
    pub message_text: Option<String>,
    pub highlights: Vec<MatchRange>,
}

/// In-memory rendering surface. Panel front ends poll [`PanelRenderer::view`].
#[derive(Debug, Default)]
pub struct PanelRenderer {
    view: RwLock<PanelView>,
}

impl PanelRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> PanelView {
        self.view.read().clone()
    }
}

impl Renderer for PanelRenderer {
    fn render_counts(&self, counts: &StorageCounts) {
        let mut view = self.view.write();
        view.counts = *counts;
        view.local_label = count_label(StorageKind::Local, counts);
        view.session_label = count_label(StorageKind::Session, counts);
    }

    fn render_key_list(&self, storage: StorageKind, items: &[KeyListItem]) {
        let mut view = self.view.write();
        view.storage = storage;
        view.keys = items.to_vec();
        view.key_list_markup = items.iter().map(|item| item.markup.as_str()).collect();
        view.active_index = None;
    }

    fn set_active_key(&self, index: Option<usize>) {
        self.view.write().active_index = index;
    }

    fn render_value(&self, value: Option<&ValueView>) {
        let mut view = self.view.write();
        view.value = value.cloned();
        view.highlights.clear();
    }

    fn render_message(&self, message: Option<&PanelMessage>) {
        let mut view = self.view.write();
        view.message = message.cloned();
        view.message_text = message.map(ToString::to_string);
    }

    fn render_highlights(&self, matches: &[MatchRange]) {
        self.view.write().highlights = matches.to_vec();
    }
}
