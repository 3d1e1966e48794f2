use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;

use super::SettingsStore;
use crate::error::{InspectorError, InspectorResult};

pub const SETTINGS_FILENAME: &str = "settings.json";

/// Settings persisted as a flat JSON object in `settings.json`.
/// Every `set` rewrites the file.
#[derive(Debug)]
pub struct FileSettings {
    path: PathBuf,
    data: RwLock<BTreeMap<String, String>>,
}

impl FileSettings {
    /// Loads `settings.json` from `dir`, creating the directory and an empty
    /// file when missing.
    pub fn load_or_create(dir: &Path) -> InspectorResult<Self> {
        std::fs::create_dir_all(dir).map_err(|error| {
            InspectorError::Settings(format!(
                "failed to create settings directory {}: {error}",
                dir.display()
            ))
        })?;

        let path = dir.join(SETTINGS_FILENAME);
        if !path.exists() {
            let settings = Self {
                path,
                data: RwLock::new(BTreeMap::new()),
            };
            settings.persist(&BTreeMap::new())?;
            return Ok(settings);
        }

        let text = std::fs::read_to_string(&path).map_err(|error| {
            InspectorError::Settings(format!(
                "failed to read settings {}: {error}",
                path.display()
            ))
        })?;
        let data: BTreeMap<String, String> = serde_json::from_str(&text).map_err(|error| {
            InspectorError::Settings(format!(
                "failed to parse settings {}: {error}",
                path.display()
            ))
        })?;
        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, data: &BTreeMap<String, String>) -> InspectorResult<()> {
        let text = serde_json::to_string_pretty(data)
            .map_err(|error| InspectorError::Internal(format!("settings serialize error: {error}")))?;
        std::fs::write(&self.path, text).map_err(|error| {
            InspectorError::Settings(format!(
                "failed to write settings {}: {error}",
                self.path.display()
            ))
        })
    }
}

impl SettingsStore for FileSettings {
    fn get(&self, name: &str) -> Option<String> {
        self.data.read().get(name).cloned()
    }

    fn set(&self, name: &str, value: &str) -> InspectorResult<()> {
        let mut data = self.data.write();
        data.insert(name.to_string(), value.to_string());
        self.persist(&data)
    }
}
