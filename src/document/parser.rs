//! JSON parsing into the document model.
//!
//! Parsing delegates to `serde_json` (built with `preserve_order`, so object
//! members keep their source order) and converts the result into a
//! `JsonTree`.
//!
//! # Example
//!
//! ```
//! use jsonquill::document::parser::parse_json;
//! use jsonquill::document::path::JsonPath;
//!
//! let tree = parse_json(r#"{"name": "Alice", "age": 30}"#).unwrap();
//! let name = tree.get(&JsonPath::root().child("name")).unwrap();
//! assert_eq!(name.type_name(), "string");
//! ```

use indexmap::IndexMap;
use serde_json::Value as SerdeValue;

use super::node::{JsonNumber, JsonValue};
use super::tree::JsonTree;
use crate::error::EditError;

/// Parses JSON text into a fresh `JsonTree`.
///
/// Fails with `EditError::Parse` on invalid syntax.
pub fn parse_json(content: &str) -> Result<JsonTree, EditError> {
    let value: SerdeValue =
        serde_json::from_str(content).map_err(|e| EditError::Parse(e.to_string()))?;
    Ok(JsonTree::new(parse_value(&value)))
}

/// Decodes UTF-8 bytes and parses them as JSON.
///
/// Fails with `EditError::Encoding` if the bytes are not valid UTF-8. A
/// leading byte-order mark is skipped.
pub fn parse_json_bytes(bytes: &[u8]) -> Result<JsonTree, EditError> {
    let text = std::str::from_utf8(bytes).map_err(|e| EditError::Encoding(e.to_string()))?;
    parse_json(text.strip_prefix('\u{feff}').unwrap_or(text))
}

/// Converts a `serde_json::Value` into a `JsonValue`.
pub fn parse_value(value: &SerdeValue) -> JsonValue {
    match value {
        SerdeValue::Null => JsonValue::Null,
        SerdeValue::Bool(b) => JsonValue::Boolean(*b),
        SerdeValue::Number(n) => JsonValue::Number(match (n.as_i64(), n.as_u64()) {
            (Some(i), _) => JsonNumber::Integer(i),
            (None, Some(u)) => JsonNumber::Unsigned(u),
            (None, None) => JsonNumber::Float(n.as_f64().unwrap_or(0.0)),
        }),
        SerdeValue::String(s) => JsonValue::String(s.clone()),
        SerdeValue::Array(items) => JsonValue::Array(items.iter().map(parse_value).collect()),
        SerdeValue::Object(map) => {
            let entries: IndexMap<String, JsonValue> = map
                .iter()
                .map(|(k, v)| (k.clone(), parse_value(v)))
                .collect();
            JsonValue::Object(entries)
        }
    }
}
