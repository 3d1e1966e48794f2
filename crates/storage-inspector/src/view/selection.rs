use serde::Serialize;

/// Which entry the user was last looking at. Survives snapshot replacement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectionState {
    pub last_shown_key: Option<String>,
    pub last_shown_index: Option<usize>,
}

impl SelectionState {
    pub fn is_empty(&self) -> bool {
        self.last_shown_key.is_none() && self.last_shown_index.is_none()
    }

    pub fn record(&mut self, key: &str, index: usize) {
        self.last_shown_key = Some(key.to_string());
        self.last_shown_index = Some(index);
    }

    pub fn reset(&mut self) {
        self.last_shown_key = None;
        self.last_shown_index = None;
    }
}

/// What to show after a refresh replaced the key list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// Show `key`, now at `index`.
    Reselect { key: String, index: usize },
    /// There was a selection but nothing is left to show.
    Cleared,
    /// Nothing was selected before the refresh.
    Unselected,
}

/// Re-selects the previously shown key, or whichever key took its position.
///
/// A key that still exists wins wherever it moved to. Otherwise the recorded
/// index is clamped to the end of `keys`.
pub fn reconcile(selection: &SelectionState, keys: &[String]) -> Reconciliation {
    if let Some(key) = &selection.last_shown_key {
        if let Some(index) = keys.iter().position(|k| k == key) {
            return Reconciliation::Reselect {
                key: key.clone(),
                index,
            };
        }
    }

    if selection.is_empty() {
        return Reconciliation::Unselected;
    }

    match (selection.last_shown_index, keys.last()) {
        (Some(index), Some(_)) => {
            let index = index.min(keys.len() - 1);
            Reconciliation::Reselect {
                key: keys[index].clone(),
                index,
            }
        }
        _ => Reconciliation::Cleared,
    }
}
