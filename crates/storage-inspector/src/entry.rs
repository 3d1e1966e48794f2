//! Per-key metadata derived from a raw stored string.
//!
//! Only values that look like a JSON object, array or quoted string are
//! parsed. Bare numbers and booleans stay strings so a stored `123` is
//! never shown as a number.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Structural kind of a stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    Object,
    Array,
    String,
    Number,
    Boolean,
    Null,
    Other,
}

impl TypeTag {
    pub fn as_str(self) -> &'static str {
        match self {
            TypeTag::Object => "object",
            TypeTag::Array => "array",
            TypeTag::String => "string",
            TypeTag::Number => "number",
            TypeTag::Boolean => "boolean",
            TypeTag::Null => "null",
            TypeTag::Other => "other",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored value, decoded when it is structured JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedValue {
    Raw(String),
    Json(Value),
}

impl ParsedValue {
    /// Text for the value-display region.
    pub fn display_text(&self) -> String {
        match self {
            ParsedValue::Raw(raw) => raw.clone(),
            ParsedValue::Json(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub value: ParsedValue,
    /// Length of the raw string in UTF-16 code units, as the page reports it.
    pub raw_length: usize,
    pub type_tag: TypeTag,
}

impl Entry {
    pub fn from_raw(raw: &str) -> Self {
        let value = match try_parse_json(raw) {
            Some(value) => ParsedValue::Json(value),
            None => ParsedValue::Raw(raw.to_string()),
        };
        let type_tag = guess_type(&value);
        Self {
            value,
            raw_length: raw.encode_utf16().count(),
            type_tag,
        }
    }
}

/// Parses `raw` only when it starts with `{`, `[` or `"`.
pub fn try_parse_json(raw: &str) -> Option<Value> {
    if !raw.starts_with(['{', '[', '"']) {
        return None;
    }
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(error) => {
            tracing::trace!("stored value is not JSON: {error}");
            None
        }
    }
}

pub fn guess_type(value: &ParsedValue) -> TypeTag {
    match value {
        ParsedValue::Raw(_) => TypeTag::String,
        ParsedValue::Json(json) => match json {
            Value::Null => TypeTag::Null,
            Value::Array(_) => TypeTag::Array,
            Value::Object(_) => TypeTag::Object,
            Value::Bool(_) => TypeTag::Boolean,
            Value::Number(_) => TypeTag::Number,
            Value::String(_) => TypeTag::String,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn structured_values_are_classified() {
        assert_eq!(Entry::from_raw(r#"{"a":1}"#).type_tag, TypeTag::Object);
        assert_eq!(Entry::from_raw("[1,2,3]").type_tag, TypeTag::Array);
        assert_eq!(Entry::from_raw(r#""quoted""#).type_tag, TypeTag::String);
        assert_eq!(
            Entry::from_raw(r#"{"a":1}"#).value,
            ParsedValue::Json(json!({ "a": 1 }))
        );
    }

    #[test]
    fn bare_primitives_stay_strings() {
        for raw in ["123", "true", "null", "-1.5e3", "hello", ""] {
            let entry = Entry::from_raw(raw);
            assert_eq!(entry.type_tag, TypeTag::String, "raw value {raw:?}");
            assert_eq!(entry.value, ParsedValue::Raw(raw.to_string()));
        }
    }

    #[test]
    fn invalid_json_falls_back_to_raw_string() {
        for raw in ["{not json", "[1,", r#""unterminated"#, "{} trailing"] {
            let entry = Entry::from_raw(raw);
            assert_eq!(entry.type_tag, TypeTag::String);
            assert_eq!(entry.value.display_text(), raw);
        }
    }

    #[test]
    fn leading_whitespace_skips_parsing() {
        let entry = Entry::from_raw(" {\"a\":1}");
        assert_eq!(entry.type_tag, TypeTag::String);
    }

    #[test]
    fn guess_type_covers_every_json_kind() {
        let cases = [
            (Value::Null, TypeTag::Null),
            (json!([]), TypeTag::Array),
            (json!({}), TypeTag::Object),
            (json!(false), TypeTag::Boolean),
            (json!(4), TypeTag::Number),
            (json!("s"), TypeTag::String),
        ];
        for (value, expected) in cases {
            assert_eq!(guess_type(&ParsedValue::Json(value)), expected);
        }
    }

    #[test]
    fn raw_length_counts_utf16_units() {
        assert_eq!(Entry::from_raw("abc").raw_length, 3);
        assert_eq!(Entry::from_raw("héllo").raw_length, 5);
        assert_eq!(Entry::from_raw("😀").raw_length, 2);
    }

    #[test]
    fn structured_display_is_pretty_printed() {
        let entry = Entry::from_raw(r#"{"a":[1,2]}"#);
        assert_eq!(
            entry.value.display_text(),
            "{\n  \"a\": [\n    1,\n    2\n  ]\n}"
        );
    }
}
