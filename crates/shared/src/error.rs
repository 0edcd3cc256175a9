use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body the prediction service sends with non-2xx statuses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceErrorBody {
    pub detail: serde_json::Value,
}

impl ServiceErrorBody {
    /// Best-effort human readable detail from a raw error body.
    pub fn describe(raw: &[u8]) -> String {
        match serde_json::from_slice::<ServiceErrorBody>(raw) {
            Ok(ServiceErrorBody {
                detail: serde_json::Value::String(detail),
            }) => detail,
            Ok(body) => body.detail.to_string(),
            Err(_) if raw.is_empty() => "<empty body>".to_string(),
            Err(_) => String::from_utf8_lossy(raw).into_owned(),
        }
    }
}

/// A prediction response that does not have the documented shape.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("response body is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),
    #[error("response body must be a JSON object keyed by model name, got {found}")]
    NotAnObject { found: &'static str },
    #[error("entry for model '{model}' is malformed: {source}")]
    MalformedEntry {
        model: String,
        #[source]
        source: serde_json::Error,
    },
}

pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_string_detail() {
        let raw = br#"{"detail":"No predictions found for 2023-02-31."}"#;
        assert_eq!(
            ServiceErrorBody::describe(raw),
            "No predictions found for 2023-02-31."
        );
    }

    #[test]
    fn describes_structured_detail_as_json() {
        let raw = br#"{"detail":[{"loc":["body","date"],"msg":"field required"}]}"#;
        assert!(ServiceErrorBody::describe(raw).contains("field required"));
    }

    #[test]
    fn falls_back_to_raw_text() {
        assert_eq!(ServiceErrorBody::describe(b"Bad Gateway"), "Bad Gateway");
        assert_eq!(ServiceErrorBody::describe(b""), "<empty body>");
    }
}
