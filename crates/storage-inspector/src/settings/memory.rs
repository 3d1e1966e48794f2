use std::collections::HashMap;

use parking_lot::RwLock;

use super::SettingsStore;
use crate::error::InspectorResult;

#[derive(Debug, Default)]
pub struct MemorySettings {
    data: RwLock<HashMap<String, String>>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self, name: &str) -> Option<String> {
        self.data.read().get(name).cloned()
    }

    fn set(&self, name: &str, value: &str) -> InspectorResult<()> {
        self.data.write().insert(name.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_missing_returns_none() {
        let settings = MemorySettings::new();
        assert!(settings.get("nonexistent").is_none());
    }

    #[test]
    fn set_overwrites() {
        let settings = MemorySettings::new();
        settings.set("theme", "light").unwrap();
        settings.set("theme", "dark").unwrap();
        assert_eq!(settings.get("theme").as_deref(), Some("dark"));
    }
}
