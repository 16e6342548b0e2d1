//! JSON serialization of the document model.
//!
//! Output is pretty-printed with a fixed indentation, object members in
//! insertion order, and non-ASCII characters written verbatim.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Number, Value as SerdeValue};

use super::node::{JsonNumber, JsonValue};
use super::path::JsonPath;
use super::tree::JsonTree;
use crate::error::EditError;

/// Indentation used when none is configured.
pub const DEFAULT_INDENT: usize = 4;

/// Serializes a tree with the default four-space indentation.
///
/// # Example
///
/// ```
/// use jsonquill::document::parser::parse_json;
/// use jsonquill::document::serializer::serialize;
///
/// let tree = parse_json(r#"{"b": 1, "a": "é"}"#).unwrap();
/// assert_eq!(serialize(&tree), "{\n    \"b\": 1,\n    \"a\": \"é\"\n}");
/// ```
pub fn serialize(tree: &JsonTree) -> String {
    serialize_with_indent(tree, DEFAULT_INDENT)
}

/// Serializes a tree indenting each level by `indent_size` spaces.
pub fn serialize_with_indent(tree: &JsonTree, indent_size: usize) -> String {
    let indent = " ".repeat(indent_size);
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut out = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);

    // Writing a Value into a Vec cannot fail: keys are strings and
    // non-finite floats were already mapped to null.
    if to_serde_value(tree.root()).serialize(&mut serializer).is_err() {
        return String::new();
    }
    String::from_utf8(out).unwrap_or_default()
}

/// Serializes a single value on one line.
pub fn serialize_compact(value: &JsonValue) -> String {
    to_serde_value(value).to_string()
}

/// Converts a `JsonValue` into a `serde_json::Value`.
pub fn to_serde_value(value: &JsonValue) -> SerdeValue {
    match value {
        JsonValue::Null => SerdeValue::Null,
        JsonValue::Boolean(b) => SerdeValue::Bool(*b),
        JsonValue::Number(JsonNumber::Integer(i)) => SerdeValue::Number((*i).into()),
        JsonValue::Number(JsonNumber::Unsigned(u)) => SerdeValue::Number((*u).into()),
        JsonValue::Number(JsonNumber::Float(f)) => Number::from_f64(*f)
            .map(SerdeValue::Number)
            .unwrap_or(SerdeValue::Null),
        JsonValue::String(s) => SerdeValue::String(s.clone()),
        JsonValue::Array(items) => SerdeValue::Array(items.iter().map(to_serde_value).collect()),
        JsonValue::Object(entries) => {
            let mut map = Map::new();
            for (key, child) in entries {
                map.insert(key.clone(), to_serde_value(child));
            }
            SerdeValue::Object(map)
        }
    }
}

/// Fails with `EditError::NonFiniteNumber` for the first NaN or infinite
/// float in the document, which JSON text cannot represent.
pub fn ensure_finite(tree: &JsonTree) -> Result<(), EditError> {
    match first_non_finite(tree.root(), JsonPath::root()) {
        Some(path) => Err(EditError::NonFiniteNumber(path.to_string())),
        None => Ok(()),
    }
}

fn first_non_finite(value: &JsonValue, path: JsonPath) -> Option<JsonPath> {
    match value {
        JsonValue::Number(JsonNumber::Float(f)) if !f.is_finite() => Some(path),
        JsonValue::Object(entries) => entries
            .iter()
            .find_map(|(key, child)| first_non_finite(child, path.child(key.as_str()))),
        JsonValue::Array(elements) => elements
            .iter()
            .enumerate()
            .find_map(|(i, child)| first_non_finite(child, path.child(i))),
        JsonValue::Number(_) | JsonValue::String(_) | JsonValue::Boolean(_) | JsonValue::Null => {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parser::parse_json;

    #[test]
    fn test_custom_indent() {
        let tree = parse_json(r#"{"a": [1]}"#).unwrap();
        assert_eq!(
            serialize_with_indent(&tree, 2),
            "{\n  \"a\": [\n    1\n  ]\n}"
        );
    }

    #[test]
    fn test_float_keeps_fraction() {
        let tree = parse_json("[2.0, 0.5]").unwrap();
        assert_eq!(serialize_compact(tree.root()), "[2.0,0.5]");
    }

    #[test]
    fn test_empty_containers() {
        let tree = parse_json(r#"{"o": {}, "a": []}"#).unwrap();
        assert_eq!(serialize(&tree), "{\n    \"o\": {},\n    \"a\": []\n}");
    }

    #[test]
    fn test_unsigned_stays_exact() {
        let tree = parse_json("[18446744073709551615]").unwrap();
        assert_eq!(serialize_compact(tree.root()), "[18446744073709551615]");
    }

    #[test]
    fn test_ensure_finite_reports_path() {
        let tree = JsonTree::new(JsonValue::Array(vec![
            JsonValue::from(1.0),
            JsonValue::from(f64::NAN),
        ]));
        assert_eq!(
            ensure_finite(&tree).unwrap_err(),
            EditError::NonFiniteNumber("/1".to_string())
        );
        assert!(ensure_finite(&parse_json("[1.5]").unwrap()).is_ok());
    }
}
