//! JSON value representation.
//!
//! This module provides the core data structure for representing JSON documents
//! in jsonquill. A `JsonValue` is a closed tagged union over the six JSON types;
//! objects keep their members in insertion order so a document round-trips with
//! its keys where the author put them.
//!
//! # Example
//!
//! ```
//! use jsonquill::document::node::{JsonNumber, JsonValue};
//! use indexmap::IndexMap;
//!
//! let mut map = IndexMap::new();
//! map.insert("name".to_string(), JsonValue::String("jsonquill".to_string()));
//! map.insert("version".to_string(), JsonValue::Number(JsonNumber::Integer(1)));
//! let object = JsonValue::Object(map);
//!
//! assert!(object.is_container());
//! assert_eq!(object.type_name(), "object");
//! ```

use indexmap::IndexMap;
use std::fmt;

/// Represents JSON numbers (integer or float).
///
/// Integers that fit in an `i64` or `u64` are kept exact; everything else is
/// a float.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JsonNumber {
    Integer(i64),
    /// Only for integers above `i64::MAX`
    Unsigned(u64),
    Float(f64),
}

impl fmt::Display for JsonNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonNumber::Integer(i) => write!(f, "{}", i),
            JsonNumber::Unsigned(u) => write!(f, "{}", u),
            // Keep integral floats distinguishable from integers.
            JsonNumber::Float(fl) if fl.is_finite() && fl.fract() == 0.0 => {
                write!(f, "{:.1}", fl)
            }
            JsonNumber::Float(fl) => write!(f, "{}", fl),
        }
    }
}

impl JsonNumber {
    pub fn as_f64(&self) -> f64 {
        match self {
            JsonNumber::Integer(i) => *i as f64,
            JsonNumber::Unsigned(u) => *u as f64,
            JsonNumber::Float(f) => *f,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, JsonNumber::Integer(_) | JsonNumber::Unsigned(_))
    }

    /// Parses a numeric literal, trimming surrounding whitespace.
    ///
    /// Integers are tried first, then finite floats. `inf`, `NaN` and other
    /// spellings Rust accepts but JSON does not are rejected.
    ///
    /// ```
    /// use jsonquill::document::node::JsonNumber;
    ///
    /// assert_eq!(JsonNumber::parse_literal(" 43 "), Some(JsonNumber::Integer(43)));
    /// assert_eq!(JsonNumber::parse_literal("4.5"), Some(JsonNumber::Float(4.5)));
    /// assert_eq!(JsonNumber::parse_literal("abc"), None);
    /// assert_eq!(JsonNumber::parse_literal("inf"), None);
    /// ```
    pub fn parse_literal(input: &str) -> Option<Self> {
        Self::parse_integer(input).or_else(|| Self::parse_float(input))
    }

    /// Parses an integer literal, trimming surrounding whitespace.
    ///
    /// ```
    /// use jsonquill::document::node::JsonNumber;
    ///
    /// assert_eq!(JsonNumber::parse_integer("-7"), Some(JsonNumber::Integer(-7)));
    /// assert_eq!(
    ///     JsonNumber::parse_integer("18446744073709551615"),
    ///     Some(JsonNumber::Unsigned(u64::MAX))
    /// );
    /// assert_eq!(JsonNumber::parse_integer("4.5"), None);
    /// ```
    pub fn parse_integer(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if let Ok(i) = trimmed.parse::<i64>() {
            return Some(JsonNumber::Integer(i));
        }
        trimmed.parse::<u64>().ok().map(JsonNumber::Unsigned)
    }

    /// Parses a finite float literal, trimming surrounding whitespace.
    ///
    /// Integer spellings are accepted and stored as floats (`"43"` gives
    /// `Float(43.0)`).
    pub fn parse_float(input: &str) -> Option<Self> {
        match input.trim().parse::<f64>() {
            Ok(f) if f.is_finite() => Some(JsonNumber::Float(f)),
            _ => None,
        }
    }
}

/// A JSON value.
///
/// Containers own their children directly, so cloning a value deep-copies
/// the whole subtree.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
    /// A JSON object; members keep insertion order
    Object(IndexMap<String, JsonValue>),
    /// A JSON array
    Array(Vec<JsonValue>),
    /// A JSON string
    String(String),
    /// A JSON number (integer or float)
    Number(JsonNumber),
    /// A JSON boolean
    Boolean(bool),
    /// A JSON null value
    Null,
}

impl JsonValue {
    /// Returns true if this value is an object.
    pub fn is_object(&self) -> bool {
        matches!(self, JsonValue::Object(_))
    }

    /// Returns true if this value is an array.
    pub fn is_array(&self) -> bool {
        matches!(self, JsonValue::Array(_))
    }

    /// Returns true if this value is a container (object or array).
    ///
    /// # Example
    ///
    /// ```
    /// use jsonquill::document::node::{JsonNumber, JsonValue};
    /// use indexmap::IndexMap;
    ///
    /// assert!(JsonValue::Object(IndexMap::new()).is_container());
    /// assert!(JsonValue::Array(vec![]).is_container());
    /// assert!(!JsonValue::Number(JsonNumber::Integer(42)).is_container());
    /// ```
    pub fn is_container(&self) -> bool {
        matches!(self, JsonValue::Object(_) | JsonValue::Array(_))
    }

    /// Number of direct children; zero for leaves.
    pub fn child_count(&self) -> usize {
        match self {
            JsonValue::Object(entries) => entries.len(),
            JsonValue::Array(elements) => elements.len(),
            JsonValue::String(_)
            | JsonValue::Number(_)
            | JsonValue::Boolean(_)
            | JsonValue::Null => 0,
        }
    }

    /// The lowercase JSON type name, used in status and error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            JsonValue::Object(_) => "object",
            JsonValue::Array(_) => "array",
            JsonValue::String(_) => "string",
            JsonValue::Number(_) => "number",
            JsonValue::Boolean(_) => "boolean",
            JsonValue::Null => "null",
        }
    }
}

impl From<&str> for JsonValue {
    fn from(s: &str) -> Self {
        JsonValue::String(s.to_string())
    }
}

impl From<String> for JsonValue {
    fn from(s: String) -> Self {
        JsonValue::String(s)
    }
}

impl From<i64> for JsonValue {
    fn from(i: i64) -> Self {
        JsonValue::Number(JsonNumber::Integer(i))
    }
}

impl From<f64> for JsonValue {
    fn from(f: f64) -> Self {
        JsonValue::Number(JsonNumber::Float(f))
    }
}

impl From<bool> for JsonValue {
    fn from(b: bool) -> Self {
        JsonValue::Boolean(b)
    }
}
