//! View-state reconciliation for the storage panel.
//!
//! [`reconcile`] and [`ViewState`] are plain data and functions;
//! [`StorageViewController`] wires them to the accessor and the renderer.

mod controller;
mod selection;
mod state;

pub use controller::{RefreshMode, RefreshOutcome, StorageViewController};
pub use selection::{reconcile, Reconciliation, SelectionState};
pub use state::ViewState;
