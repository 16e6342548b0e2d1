//! Display formatting for values shown in a tree view or status line.

use super::node::JsonValue;

/// Renders a value as its canonical display string.
///
/// Leaves render as `null`, `true`/`false`, the natural number form, or the
/// raw string. Containers render as a short size preview.
///
/// # Example
///
/// ```
/// use jsonquill::document::format::format_value;
/// use jsonquill::document::node::JsonValue;
///
/// assert_eq!(format_value(&JsonValue::Null), "null");
/// assert_eq!(format_value(&JsonValue::Boolean(false)), "false");
/// assert_eq!(format_value(&JsonValue::from(42i64)), "42");
/// assert_eq!(format_value(&JsonValue::from("hi")), "hi");
/// assert_eq!(format_value(&JsonValue::Array(vec![JsonValue::Null])), "[ 1 item ]");
/// ```
pub fn format_value(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => "null".to_string(),
        JsonValue::Boolean(b) => b.to_string(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::String(s) => s.clone(),
        JsonValue::Object(entries) => {
            format!("{{ {} {} }}", entries.len(), plural(entries.len(), "field"))
        }
        JsonValue::Array(elements) => {
            format!("[ {} {} ]", elements.len(), plural(elements.len(), "item"))
        }
    }
}

/// Truncates a display string to `max_chars`, appending an ellipsis.
pub fn truncate_preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", kept)
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
