use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::EvaluationError;

/// Sizes of both storages, used for the storage-type labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageCounts {
    pub local: usize,
    pub session: usize,
}

impl StorageCounts {
    pub fn from_value(value: &Value) -> Result<Self, EvaluationError> {
        serde_json::from_value(value.clone())
            .map_err(|e| EvaluationError::MalformedResult(format!("storage counts: {e}")))
    }
}

/// A full point-in-time copy of one storage, in the host's iteration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StorageSnapshot {
    pairs: Vec<(String, String)>,
}

impl StorageSnapshot {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// Decodes a remote result: either `[[key, value], ...]` or a
    /// string-keyed object of string values.
    pub fn from_value(value: Value) -> Result<Self, EvaluationError> {
        let pairs = match value {
            Value::Array(items) => items
                .into_iter()
                .map(decode_pair)
                .collect::<Result<Vec<_>, _>>()?,
            Value::Object(map) => map
                .into_iter()
                .map(|(key, value)| match value {
                    Value::String(value) => Ok((key, value)),
                    other => Err(EvaluationError::MalformedResult(format!(
                        "value of '{key}' is not a string: {other}"
                    ))),
                })
                .collect::<Result<Vec<_>, _>>()?,
            other => {
                return Err(EvaluationError::MalformedResult(format!(
                    "expected storage entries, got {other}"
                )))
            }
        };
        Ok(Self { pairs })
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

fn decode_pair(item: Value) -> Result<(String, String), EvaluationError> {
    match item {
        Value::Array(mut pair) if pair.len() == 2 => {
            let value = pair.pop();
            let key = pair.pop();
            match (key, value) {
                (Some(Value::String(key)), Some(Value::String(value))) => Ok((key, value)),
                (key, value) => Err(EvaluationError::MalformedResult(format!(
                    "storage entry is not a string pair: [{}, {}]",
                    key.unwrap_or(Value::Null),
                    value.unwrap_or(Value::Null)
                ))),
            }
        }
        other => Err(EvaluationError::MalformedResult(format!(
            "storage entry is not a pair: {other}"
        ))),
    }
}
