//! Pulls generated text out of a provider response.
//!
//! Provider SDKs and REST endpoints nest the text differently, so the
//! response is probed along a fixed list of paths. When none match, the whole
//! response is returned pretty-printed; extraction itself never fails.

use serde::Serialize;
use serde_json::Value;

/// JSON pointers tried in order; the first non-null hit wins.
pub const CANDIDATE_TEXT_PATHS: [&str; 3] = [
    "/response/candidates/0/content/parts/0/text",
    "/candidates/0/content/parts/0/text",
    "/response/candidates/0/content/text",
];

/// Return the first generated text found in `response`, or a pretty-printed
/// dump of the whole response when no known path resolves.
pub fn extract_text<T: Serialize + ?Sized>(response: &T) -> String {
    let tree = match serde_json::to_value(response) {
        Ok(tree) => tree,
        Err(e) => {
            tracing::error!(error = %e, "Provider response could not be converted to JSON");
            return format!("Unreadable provider response: {}", e);
        }
    };

    if let Some(text) = probe(&tree) {
        return text;
    }

    tracing::warn!("No generated text found in provider response, returning raw payload");
    dump(&tree)
}

fn probe(tree: &Value) -> Option<String> {
    CANDIDATE_TEXT_PATHS
        .iter()
        .filter_map(|path| tree.pointer(path))
        .find(|value| !value.is_null())
        .map(|value| match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        })
}

fn dump(tree: &Value) -> String {
    match serde_json::to_string_pretty(tree) {
        Ok(pretty) => pretty,
        Err(e) => {
            tracing::error!(error = %e, "Failed to pretty-print provider response");
            tree.to_string()
        }
    }
}
