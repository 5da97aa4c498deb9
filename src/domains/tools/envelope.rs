//! Result envelope construction.
//!
//! Every tool returns an rmcp [`CallToolResult`]: text content blocks, an
//! optional `structuredContent` payload and the `isError` flag. The helpers
//! here turn a backend outcome into that shape according to a [`ToolPolicy`].

use rmcp::model::{CallToolResult, Content};
use serde_json::Value;
use tracing::warn;

use super::policy::{SuccessRendering, ToolPolicy};
use crate::domains::backend::{BackendError, FailureClass};

/// Wrap a single payload into a one-element array; arrays pass through.
pub fn normalize_to_list(payload: Value) -> Value {
    match payload {
        Value::Array(_) => payload,
        other => Value::Array(vec![other]),
    }
}

/// Build the envelope for a backend outcome.
///
/// `subject` is the identifier the call was about (the order number), if
/// any; it is quoted in failure messages.
pub fn respond(
    policy: &ToolPolicy,
    subject: Option<&str>,
    outcome: Result<Value, BackendError>,
) -> CallToolResult {
    match outcome {
        Ok(payload) => success(policy, payload),
        Err(err) => failure(policy, subject, &err),
    }
}

/// Render a successful payload.
pub fn success(policy: &ToolPolicy, payload: Value) -> CallToolResult {
    match policy.success {
        SuccessRendering::StructuredList => CallToolResult {
            content: vec![],
            structured_content: Some(normalize_to_list(payload)),
            is_error: Some(false),
            meta: None,
        },
        SuccessRendering::CompactText => {
            CallToolResult::success(vec![Content::text(payload.to_string())])
        }
        SuccessRendering::PrettyText => {
            let text = serde_json::to_string_pretty(&payload).unwrap_or_else(|_| payload.to_string());
            CallToolResult::success(vec![Content::text(text)])
        }
    }
}

/// Render a failure as a single text block.
///
/// Flagged tools set `isError: true`; the others leave the flag out
/// entirely rather than reporting `false`.
pub fn failure(policy: &ToolPolicy, subject: Option<&str>, err: &BackendError) -> CallToolResult {
    let message = failure_message(policy, subject, err);
    warn!("{}", message);

    CallToolResult {
        content: vec![Content::text(message)],
        structured_content: None,
        is_error: policy.flag_failures.then_some(true),
        meta: None,
    }
}

/// The user-facing text for a failed backend call.
pub fn failure_message(policy: &ToolPolicy, subject: Option<&str>, err: &BackendError) -> String {
    let class = err.class();

    if let (FailureClass::NotFound, Some(label)) = (class, policy.not_found) {
        return match subject {
            Some(id) => format!("{} {} not found.", label, id),
            None => format!("{} not found.", label),
        };
    }

    match class {
        FailureClass::NotFound | FailureClass::Http => match subject {
            Some(id) => format!("{} {}: {}", policy.http_error, id, err),
            None => format!("{}: {}", policy.http_error, err),
        },
        FailureClass::Transport => format!("{}: {}", policy.transport_error, err),
    }
}
