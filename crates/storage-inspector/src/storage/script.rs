//! Script sources evaluated inside the inspected page.
//!
//! Keys are embedded as JSON string literals, which are valid JavaScript
//! string literals, so arbitrary key text cannot break out of the call.

use super::StorageKind;

/// Reads both storages' lengths as `{ local, session }`.
pub fn fetch_counts() -> String {
    "({ local: window.localStorage.length, session: window.sessionStorage.length })".to_string()
}

/// Reads every pair of one storage as `[[key, value], ...]` in index order.
pub fn fetch_all(kind: StorageKind) -> String {
    format!(
        "(function () {{ \
var storage = window.{storage}; \
var entries = []; \
for (var i = 0; i < storage.length; i++) {{ \
var key = storage.key(i); \
entries.push([key, storage.getItem(key)]); \
}} \
return entries; \
}})()",
        storage = kind.global_name()
    )
}

pub fn remove(kind: StorageKind, key: &str) -> String {
    format!(
        "window.{}.removeItem({})",
        kind.global_name(),
        js_string_literal(key)
    )
}

pub fn clear(kind: StorageKind) -> String {
    format!("window.{}.clear()", kind.global_name())
}

fn js_string_literal(value: &str) -> String {
    // JSON strings never fail to serialize.
    serde_json::Value::String(value.to_string()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_all_targets_named_storage() {
        let source = fetch_all(StorageKind::Session);
        assert!(source.contains("window.sessionStorage;"));
        assert!(!source.contains("localStorage"));
    }

    #[test]
    fn remove_quotes_key() {
        assert_eq!(
            remove(StorageKind::Local, r#"a"b');alert(1)//"#),
            r#"window.localStorage.removeItem("a\"b');alert(1)//")"#
        );
    }

    #[test]
    fn clear_targets_named_storage() {
        assert_eq!(clear(StorageKind::Session), "window.sessionStorage.clear()");
    }
}
