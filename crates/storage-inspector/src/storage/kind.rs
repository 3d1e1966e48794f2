use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two Web Storage areas of the inspected page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StorageKind {
    #[default]
    #[serde(rename = "localStorage", alias = "local")]
    Local,
    #[serde(rename = "sessionStorage", alias = "session")]
    Session,
}

impl StorageKind {
    /// Maps a user- or settings-supplied name onto a storage.
    /// Anything unrecognized means `localStorage`.
    pub fn normalize(name: &str) -> Self {
        match name.trim() {
            "session" | "sessionStorage" => StorageKind::Session,
            _ => StorageKind::Local,
        }
    }

    /// The page global holding this storage.
    pub fn global_name(self) -> &'static str {
        match self {
            StorageKind::Local => "localStorage",
            StorageKind::Session => "sessionStorage",
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.global_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_accepts_short_and_global_names() {
        assert_eq!(StorageKind::normalize("local"), StorageKind::Local);
        assert_eq!(StorageKind::normalize("localStorage"), StorageKind::Local);
        assert_eq!(StorageKind::normalize("session"), StorageKind::Session);
        assert_eq!(StorageKind::normalize("sessionStorage"), StorageKind::Session);
    }

    #[test]
    fn normalize_defaults_to_local() {
        assert_eq!(StorageKind::normalize(""), StorageKind::Local);
        assert_eq!(StorageKind::normalize("indexedDB"), StorageKind::Local);
        assert_eq!(StorageKind::normalize("SESSION"), StorageKind::Local);
    }

    #[test]
    fn serde_uses_global_names() {
        let json = serde_json::to_string(&StorageKind::Session).unwrap();
        assert_eq!(json, r#""sessionStorage""#);
        let kind: StorageKind = serde_json::from_str(r#""local""#).unwrap();
        assert_eq!(kind, StorageKind::Local);
    }
}
