// Response text extraction (Gemini → relay result)
// Author: kelexine (https://github.com/kelexine)

use serde_json::Value;
use tracing::error;

/// Locations the answer text may live at, tried in order. The first is the
/// wrapped envelope some API variants return, the second the plain
/// `generateContent` shape, the third a content object without parts.
const TEXT_POINTERS: [&str; 3] = [
    "/response/candidates/0/content/parts/0/text",
    "/candidates/0/content/parts/0/text",
    "/response/candidates/0/content/text",
];

/// Pull the answer out of an upstream response.
///
/// The first non-null value found wins and is returned as-is, so a
/// non-string answer stays a JSON number, bool or object. When nothing
/// matches, the whole response is returned as a string of pretty-printed
/// JSON with 2-space indentation. Never fails.
pub fn extract_result(response: &Value) -> Value {
    match find_text(response) {
        Some(value) => value.clone(),
        None => Value::String(dump(response)),
    }
}

fn find_text(response: &Value) -> Option<&Value> {
    TEXT_POINTERS
        .iter()
        .filter_map(|pointer| response.pointer(pointer))
        .find(|value| !value.is_null())
}

fn dump(response: &Value) -> String {
    serde_json::to_string_pretty(response).unwrap_or_else(|e| {
        error!("Error extracting text: {}", e);
        response.to_string()
    })
}
