use std::collections::HashMap;

use super::selection::SelectionState;
use crate::entry::Entry;
use crate::render::{KeyListItem, MetaStrip, ValueView};
use crate::storage::{StorageCounts, StorageKind, StorageSnapshot};

/// The panel's in-memory model: the entries derived from the current
/// snapshot, and the selection that outlives them.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub storage: StorageKind,
    pub counts: Option<StorageCounts>,
    pub selection: SelectionState,
    keys: Vec<String>,
    entries: HashMap<String, Entry>,
    shown: Option<ValueView>,
}

impl ViewState {
    pub fn new(storage: StorageKind) -> Self {
        Self {
            storage,
            ..Self::default()
        }
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn entry(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.keys.iter().position(|k| k == key)
    }

    /// The value currently in the display region, if any.
    pub fn shown(&self) -> Option<&ValueView> {
        self.shown.as_ref()
    }

    /// Swaps in a new snapshot and re-derives every entry from it.
    /// Selection is left for reconciliation.
    pub fn replace_snapshot(&mut self, snapshot: StorageSnapshot) {
        self.keys = snapshot.keys().map(str::to_string).collect();
        self.entries = snapshot
            .iter()
            .map(|(key, raw)| (key.to_string(), Entry::from_raw(raw)))
            .collect();
        self.shown = None;
    }

    /// Drops everything derived from the current snapshot. With
    /// `preserve_selection` the last shown key/index stay recorded so a
    /// following refresh can restore them.
    pub fn clear(&mut self, preserve_selection: bool) {
        self.keys.clear();
        self.entries.clear();
        self.shown = None;
        if !preserve_selection {
            self.selection.reset();
        }
    }

    pub fn key_list(&self) -> Vec<KeyListItem> {
        self.keys
            .iter()
            .enumerate()
            .filter_map(|(index, key)| {
                self.entries
                    .get(key)
                    .map(|entry| KeyListItem::new(index, key, entry.type_tag))
            })
            .collect()
    }

    /// Builds the value view for `key`, records it as the selection and
    /// remembers it as shown. `None` when the key is not in the snapshot.
    pub fn show(&mut self, key: &str) -> Option<ValueView> {
        let index = self.index_of(key)?;
        let entry = self.entries.get(key)?;
        let view = ValueView {
            key: key.to_string(),
            index,
            text: entry.value.display_text(),
            meta: MetaStrip {
                type_tag: entry.type_tag,
                length: entry.raw_length,
            },
        };
        self.selection.record(key, index);
        self.shown = Some(view.clone());
        Some(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::TypeTag;

    fn snapshot(pairs: &[(&str, &str)]) -> StorageSnapshot {
        StorageSnapshot::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn replace_snapshot_derives_entries_in_order() {
        let mut state = ViewState::new(StorageKind::Local);
        state.replace_snapshot(snapshot(&[("b", "[1]"), ("a", "123")]));

        assert_eq!(state.keys(), ["b", "a"]);
        assert_eq!(state.entry("b").map(|e| e.type_tag), Some(TypeTag::Array));
        assert_eq!(state.entry("a").map(|e| e.type_tag), Some(TypeTag::String));

        let list = state.key_list();
        assert_eq!(list[0].index, 0);
        assert_eq!(list[1].key, "a");
    }

    #[test]
    fn show_records_selection() {
        let mut state = ViewState::new(StorageKind::Local);
        state.replace_snapshot(snapshot(&[("a", "1"), ("b", r#"{"x":true}"#)]));

        let view = state.show("b").expect("shown");
        assert_eq!(view.index, 1);
        assert_eq!(view.meta.type_tag, TypeTag::Object);
        assert_eq!(view.meta.length, 10);
        assert_eq!(state.selection.last_shown_key.as_deref(), Some("b"));
        assert_eq!(state.selection.last_shown_index, Some(1));
        assert!(state.shown().is_some());

        assert!(state.show("missing").is_none());
        assert_eq!(state.selection.last_shown_key.as_deref(), Some("b"));
    }

    #[test]
    fn clear_optionally_keeps_selection() {
        let mut state = ViewState::new(StorageKind::Local);
        state.replace_snapshot(snapshot(&[("a", "1")]));
        state.show("a");

        state.clear(true);
        assert!(state.keys().is_empty());
        assert!(state.entry("a").is_none());
        assert!(state.shown().is_none());
        assert_eq!(state.selection.last_shown_key.as_deref(), Some("a"));

        state.clear(false);
        assert!(state.selection.is_empty());
    }
}
