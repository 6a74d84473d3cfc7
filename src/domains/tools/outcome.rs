//! Tool outcomes and the result envelope.
//!
//! Every invocation ends in a [`ToolOutcome`]. Both variants render to the
//! same envelope, a successful `CallToolResult` holding one text content
//! with pretty-printed JSON:
//!
//! ```json
//! { "content": [ { "type": "text", "text": "{\n  \"taskId\": \"abc\"\n}" } ] }
//! ```
//!
//! Callers tell failures apart by the `error` field inside `text`.

use rmcp::model::{CallToolResult, Content};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Message reported when a handler fails without an error value.
pub const UNKNOWN_ERROR: &str = "Unknown error occurred";

/// Error payload embedded in the envelope when a handler fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolFailure {
    pub error: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl ToolFailure {
    /// Failure built from an error value returned by a handler.
    ///
    /// The stack is the rendered cause chain (and backtrace when one was
    /// captured). It is omitted for a bare error without either.
    pub fn from_error(err: &anyhow::Error) -> Self {
        let has_causes = err.chain().nth(1).is_some();
        let has_backtrace =
            err.backtrace().status() == std::backtrace::BacktraceStatus::Captured;

        Self {
            error: err.to_string(),
            stack: (has_causes || has_backtrace).then(|| format!("{:?}", err)),
        }
    }

    /// Failure without a usable error value (e.g. the handler panicked).
    pub fn unknown() -> Self {
        Self {
            error: UNKNOWN_ERROR.to_string(),
            stack: None,
        }
    }
}

/// Outcome of a single tool invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome {
    Success(Value),
    Failure(ToolFailure),
}

impl ToolOutcome {
    /// Outcome for a handler's serializable success value.
    pub fn success<T: Serialize>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(value) => Self::Success(value),
            Err(e) => Self::Failure(ToolFailure {
                error: e.to_string(),
                stack: None,
            }),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Pretty-printed (2-space) JSON text carried by the envelope.
    pub fn to_text(&self) -> String {
        let rendered = match self {
            Self::Success(value) => serde_json::to_string_pretty(value),
            Self::Failure(failure) => serde_json::to_string_pretty(failure),
        };
        // Serializing a `Value` or a plain struct of strings cannot fail.
        rendered.unwrap_or_default()
    }

    /// Wrap into the envelope returned to the host.
    pub fn into_call_result(self) -> CallToolResult {
        CallToolResult::success(vec![Content::text(self.to_text())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use rmcp::model::RawContent;
    use serde_json::json;

    fn envelope_text(result: &CallToolResult) -> String {
        assert_eq!(result.content.len(), 1);
        match &result.content[0].raw {
            RawContent::Text(text) => text.text.clone(),
            other => panic!("expected text content, got {:?}", other),
        }
    }

    #[test]
    fn test_success_envelope() {
        let value = json!({ "taskId": "abc", "items": [1, 2] });
        let result = ToolOutcome::success(&value).into_call_result();

        assert_eq!(result.is_error, Some(false));
        let text = envelope_text(&result);
        assert_eq!(text, serde_json::to_string_pretty(&value).unwrap());
        assert!(text.contains("\n  \"taskId\": \"abc\""));
        assert_eq!(serde_json::from_str::<Value>(&text).unwrap(), value);
    }

    #[test]
    fn test_scalar_success() {
        let result = ToolOutcome::success(&"done").into_call_result();
        assert_eq!(envelope_text(&result), "\"done\"");

        let result = ToolOutcome::success(&()).into_call_result();
        assert_eq!(envelope_text(&result), "null");
    }

    #[test]
    fn test_failure_envelope_is_not_an_error_result() {
        let err = anyhow::anyhow!("quota exceeded");
        let result = ToolOutcome::Failure(ToolFailure::from_error(&err)).into_call_result();

        assert_eq!(result.is_error, Some(false));
        let parsed: Value = serde_json::from_str(&envelope_text(&result)).unwrap();
        assert_eq!(parsed["error"], "quota exceeded");
    }

    #[test]
    fn test_failure_stack_from_cause_chain() {
        let err = Err::<(), _>(std::io::Error::other("connection reset"))
            .context("GET /serp/google/organic/tasks_ready failed")
            .unwrap_err();
        let failure = ToolFailure::from_error(&err);

        assert_eq!(failure.error, "GET /serp/google/organic/tasks_ready failed");
        let stack = failure.stack.unwrap();
        assert!(stack.contains("connection reset"));
    }

    #[test]
    fn test_unknown_failure_has_no_stack() {
        let outcome = ToolOutcome::Failure(ToolFailure::unknown());
        let parsed: Value = serde_json::from_str(&outcome.to_text()).unwrap();
        assert_eq!(parsed, json!({ "error": "Unknown error occurred" }));
    }

    #[test]
    fn test_unserializable_success_becomes_failure() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert((1, 2), "tuple keys are not JSON object keys");
        let outcome = ToolOutcome::success(&map);
        assert!(outcome.is_failure());
    }
}
