//! Rendering surface the controller writes to.
//!
//! The controller only ever hands plain data to a [`Renderer`]; what the
//! surface does with it (DOM, JSON for a remote panel, a test recorder) is
//! up to the implementation.

mod markup;
mod panel;

use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use crate::entry::TypeTag;
use crate::search::MatchRange;
use crate::storage::{StorageCounts, StorageKind};

pub use markup::{escape_markup, key_list_item_markup, type_icon};
pub use panel::{PanelRenderer, PanelView};

/// One row of the key list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyListItem {
    pub index: usize,
    pub key: String,
    pub type_tag: TypeTag,
    /// Escaped markup for the row, safe to embed as-is.
    pub markup: String,
}

impl KeyListItem {
    pub fn new(index: usize, key: &str, type_tag: TypeTag) -> Self {
        Self {
            index,
            key: key.to_string(),
            type_tag,
            markup: key_list_item_markup(index, key, type_tag),
        }
    }
}

/// The `Type` / `Length` strip shown above a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetaStrip {
    #[serde(rename = "type")]
    pub type_tag: TypeTag,
    pub length: usize,
}

/// Content of the value-display region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueView {
    pub key: String,
    pub index: usize,
    pub text: String,
    pub meta: MetaStrip,
}

/// Status text shown in place of a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PanelMessage {
    SelectKey,
    Empty { storage: StorageKind },
    LoadError { storage: StorageKind, detail: String },
}

impl PanelMessage {
    /// The message for a panel with nothing selected.
    pub fn initial(storage: StorageKind, is_empty: bool) -> Self {
        if is_empty {
            PanelMessage::Empty { storage }
        } else {
            PanelMessage::SelectKey
        }
    }
}

impl fmt::Display for PanelMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanelMessage::SelectKey => write!(f, "Select a key to view its value"),
            PanelMessage::Empty { storage } => write!(f, "{storage} is empty"),
            PanelMessage::LoadError { storage, .. } => write!(f, "Error loading {storage}"),
        }
    }
}

/// Label for one storage-type selector, e.g. `localStorage (3)`.
pub fn count_label(storage: StorageKind, counts: &StorageCounts) -> String {
    let count = match storage {
        StorageKind::Local => counts.local,
        StorageKind::Session => counts.session,
    };
    format!("{storage} ({count})")
}

pub trait Renderer: Send + Sync {
    fn render_counts(&self, counts: &StorageCounts);
    fn render_key_list(&self, storage: StorageKind, items: &[KeyListItem]);
    fn set_active_key(&self, index: Option<usize>);
    /// `None` clears both the value region and the metadata strip.
    fn render_value(&self, value: Option<&ValueView>);
    fn render_message(&self, message: Option<&PanelMessage>);
    /// An empty slice removes all highlights.
    fn render_highlights(&self, matches: &[MatchRange]);
}

pub type SharedRenderer = Arc<dyn Renderer>;
