use serde_json::Value;
use thiserror::Error;

/// Failure to run a script inside the inspected page.
///
/// Callers surface these to the user; nothing in the crate retries them.
#[derive(Debug, Clone, Error)]
pub enum EvaluationError {
    /// No extension is attached to the bridge.
    #[error("browser extension not connected")]
    NotConnected,
    /// The script threw inside the inspected page.
    #[error("script exception: {description}")]
    Exception { description: String, details: Value },
    /// The extension could not evaluate the script at all
    /// (inspected context gone, devtools closed, ...).
    #[error("host error: {0}")]
    Host(String),
    /// The connection was replaced or dropped while the request was in flight.
    #[error("request was cancelled")]
    Cancelled,
    #[error("evaluation timed out")]
    TimedOut,
    /// The script ran but returned something other than the expected shape.
    #[error("malformed result: {0}")]
    MalformedResult(String),
}

impl EvaluationError {
    /// Builds an [`EvaluationError::Exception`] from the exception descriptor
    /// reported by the extension.
    pub fn from_exception(details: Value) -> Self {
        let description = details
            .get("description")
            .or_else(|| details.get("value"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| details.to_string());
        EvaluationError::Exception {
            description,
            details,
        }
    }
}

/// Unified error type for the storage-inspector crate.
#[derive(Debug, Clone, Error)]
pub enum InspectorError {
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
    /// A key requested for display is not in the current snapshot.
    #[error("key not found: {0}")]
    KeyNotFound(String),
    #[error("settings error: {0}")]
    Settings(String),
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias using [`InspectorError`].
pub type InspectorResult<T> = Result<T, InspectorError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn exception_prefers_description() {
        let err = EvaluationError::from_exception(json!({
            "isException": true,
            "description": "ReferenceError: foo is not defined",
            "value": "ignored"
        }));
        assert_eq!(
            err.to_string(),
            "script exception: ReferenceError: foo is not defined"
        );
    }

    #[test]
    fn exception_falls_back_to_value_then_raw() {
        let err = EvaluationError::from_exception(json!({ "value": "boom" }));
        assert_eq!(err.to_string(), "script exception: boom");

        let err = EvaluationError::from_exception(json!({ "code": 7 }));
        match err {
            EvaluationError::Exception { description, .. } => {
                assert_eq!(description, r#"{"code":7}"#);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn evaluation_error_is_transparent() {
        let err: InspectorError = EvaluationError::NotConnected.into();
        assert_eq!(err.to_string(), "browser extension not connected");
    }
}
