use serde_json::{json, Value};

use crate::infrastructure::task_api::UpstreamReply;

/// Status and JSON body the relay answers with for an upstream reply.
///
/// Success bodies are passed through when they are JSON and wrapped as
/// `{"message": ...}` otherwise. Failures keep the upstream status.
pub fn relay_response(reply: &UpstreamReply) -> (u16, Value) {
    if reply.is_success() {
        let body = serde_json::from_str::<Value>(&reply.body)
            .unwrap_or_else(|_| json!({ "message": reply.body }));
        return (200, body);
    }

    (
        reply.status,
        json!({
            "error": format!("GoodDay API error: {}", reply.status),
            "details": reply.body,
        }),
    )
}

/// Body for a relay call that never got an upstream answer.
pub fn relay_failure(details: &str) -> (u16, Value) {
    (
        500,
        json!({
            "error": "Internal server error",
            "details": details,
        }),
    )
}

/// Pretty-print a response body for humans: indented JSON when it parses,
/// the raw text otherwise.
pub fn pretty_body(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| serde_json::to_string_pretty(&value).ok())
        .unwrap_or_else(|| body.to_string())
}
