//! Persisted panel preferences.

mod file;
mod memory;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::error::InspectorResult;
use crate::storage::StorageKind;

pub use file::{FileSettings, SETTINGS_FILENAME};
pub use memory::MemorySettings;

pub const THEME_KEY: &str = "theme";
pub const STORAGE_KEY: &str = "storage";

/// Synchronous string settings store.
pub trait SettingsStore: Send + Sync {
    fn get(&self, name: &str) -> Option<String>;
    fn set(&self, name: &str, value: &str) -> InspectorResult<()>;
}

pub type SharedSettings = Arc<dyn SettingsStore>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Auto,
    Light,
    Dark,
}

impl Theme {
    /// Unrecognized names fall back to [`Theme::Auto`].
    pub fn parse(name: &str) -> Self {
        match name {
            "light" => Theme::Light,
            "dark" => Theme::Dark,
            _ => Theme::Auto,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Auto => "auto",
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed view over the two keys the panel persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PanelPreferences {
    pub theme: Theme,
    pub storage: StorageKind,
}

impl PanelPreferences {
    pub fn load(settings: &dyn SettingsStore) -> Self {
        Self {
            theme: settings
                .get(THEME_KEY)
                .map(|name| Theme::parse(&name))
                .unwrap_or_default(),
            storage: settings
                .get(STORAGE_KEY)
                .map(|name| StorageKind::normalize(&name))
                .unwrap_or_default(),
        }
    }

    pub fn save_theme(settings: &dyn SettingsStore, theme: Theme) -> InspectorResult<()> {
        settings.set(THEME_KEY, theme.as_str())
    }

    pub fn save_storage(settings: &dyn SettingsStore, storage: StorageKind) -> InspectorResult<()> {
        settings.set(STORAGE_KEY, storage.global_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset() {
        let settings = MemorySettings::new();
        assert_eq!(PanelPreferences::load(&settings), PanelPreferences::default());
        assert_eq!(PanelPreferences::default().theme, Theme::Auto);
        assert_eq!(PanelPreferences::default().storage, StorageKind::Local);
    }

    #[test]
    fn unrecognized_values_fall_back() {
        let settings = MemorySettings::new();
        settings.set(THEME_KEY, "sepia").unwrap();
        settings.set(STORAGE_KEY, "indexedDB").unwrap();
        let prefs = PanelPreferences::load(&settings);
        assert_eq!(prefs.theme, Theme::Auto);
        assert_eq!(prefs.storage, StorageKind::Local);
    }

    #[test]
    fn saves_round_trip_through_store() {
        let settings = MemorySettings::new();
        PanelPreferences::save_theme(&settings, Theme::Dark).unwrap();
        PanelPreferences::save_storage(&settings, StorageKind::Session).unwrap();
        assert_eq!(settings.get(THEME_KEY).as_deref(), Some("dark"));
        assert_eq!(settings.get(STORAGE_KEY).as_deref(), Some("sessionStorage"));
        assert_eq!(
            PanelPreferences::load(&settings),
            PanelPreferences {
                theme: Theme::Dark,
                storage: StorageKind::Session
            }
        );
    }
}
