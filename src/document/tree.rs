//! Path-addressed JSON document model.
//!
//! This module provides the `JsonTree` type, which owns a JSON document and
//! performs every read and structural mutation through a `JsonPath`. Each
//! mutation either succeeds completely or returns an error with the document
//! untouched: all validation happens before the first write.
//!
//! # Example
//!
//! ```
//! use jsonquill::document::parser::parse_json;
//! use jsonquill::document::path::JsonPath;
//! use jsonquill::document::node::JsonValue;
//!
//! let mut tree = parse_json(r#"{"items": [10, 20, 30]}"#).unwrap();
//! let first = JsonPath::root().child("items").child(0usize);
//!
//! tree.delete_node(&first).unwrap();
//!
//! // Later elements shift down: the same path now reaches 20.
//! assert_eq!(tree.get(&first).unwrap(), &JsonValue::from(20i64));
//! ```

use indexmap::IndexMap;
use std::path::{Path, PathBuf};

use super::node::JsonValue;
use super::path::{pointer_tokens, JsonPath, PathSegment};
use crate::error::EditError;

/// Placeholder stored by key/element insertion.
pub const NEW_VALUE_PLACEHOLDER: &str = "new_value";

/// Where a document came from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DocumentOrigin {
    /// Created in memory, never saved
    #[default]
    Fresh,
    /// Loaded from (or last saved to) this file
    Loaded(PathBuf),
}

impl DocumentOrigin {
    pub fn path(&self) -> Option<&Path> {
        match self {
            DocumentOrigin::Fresh => None,
            DocumentOrigin::Loaded(path) => Some(path),
        }
    }
}

/// A complete JSON document: the root value plus its provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonTree {
    root: JsonValue,
    origin: DocumentOrigin,
}

impl JsonTree {
    /// Creates a fresh (never saved) document with the given root.
    pub fn new(root: JsonValue) -> Self {
        Self {
            root,
            origin: DocumentOrigin::Fresh,
        }
    }

    pub fn with_origin(root: JsonValue, origin: DocumentOrigin) -> Self {
        Self { root, origin }
    }

    /// The sample document used for "new file".
    pub fn sample() -> Self {
        let item = |id: i64, name: &str| {
            let mut fields = IndexMap::new();
            fields.insert("id".to_string(), JsonValue::from(id));
            fields.insert("name".to_string(), JsonValue::from(name));
            JsonValue::Object(fields)
        };

        let mut root = IndexMap::new();
        root.insert("new_key".to_string(), JsonValue::from(NEW_VALUE_PLACEHOLDER));
        root.insert("is_active".to_string(), JsonValue::Boolean(true));
        root.insert(
            "items".to_string(),
            JsonValue::Array(vec![item(1, "First"), item(2, "Second")]),
        );
        Self::new(JsonValue::Object(root))
    }

    pub fn root(&self) -> &JsonValue {
        &self.root
    }

    pub fn origin(&self) -> &DocumentOrigin {
        &self.origin
    }

    pub fn set_origin(&mut self, origin: DocumentOrigin) {
        self.origin = origin;
    }

    /// Returns true if `path` resolves against the current document.
    pub fn contains(&self, path: &JsonPath) -> bool {
        self.get(path).is_ok()
    }

    /// Resolves `path` by walking from the root.
    ///
    /// Fails with `EditError::Path` if an object key is absent, an array index
    /// is out of range, a segment does not match its container kind, or a
    /// leaf is reached with path remaining.
    pub fn get(&self, path: &JsonPath) -> Result<&JsonValue, EditError> {
        let mut current = &self.root;
        for (depth, segment) in path.segments().iter().enumerate() {
            current = step(current, segment).map_err(|reason| {
                EditError::path(JsonPath::new(path.segments()[..=depth].to_vec()), reason)
            })?;
        }
        Ok(current)
    }

    fn get_mut(&mut self, path: &JsonPath) -> Result<&mut JsonValue, EditError> {
        let mut current = &mut self.root;
        for (depth, segment) in path.segments().iter().enumerate() {
            current = step_mut(current, segment).map_err(|reason| {
                EditError::path(JsonPath::new(path.segments()[..=depth].to_vec()), reason)
            })?;
        }
        Ok(current)
    }

    /// Replaces the node at a non-empty `path` with `value`.
    ///
    /// The root is never replaced this way; use `replace_root`.
    pub fn set_leaf(&mut self, path: &JsonPath, value: JsonValue) -> Result<(), EditError> {
        if path.is_root() {
            return Err(EditError::path(
                path,
                "the root cannot be replaced as a leaf",
            ));
        }
        let target = self.get_mut(path)?;
        *target = value;
        Ok(())
    }

    /// Appends a seed element to the array at `path` and returns its path.
    ///
    /// The seed mimics the array's schema: if the last element is an object,
    /// the seed is a deep copy of it. Otherwise the seed is `"new_value"`.
    pub fn insert_array_element(&mut self, path: &JsonPath) -> Result<JsonPath, EditError> {
        match self.get_mut(path)? {
            JsonValue::Array(elements) => {
                let seed = match elements.last() {
                    Some(last @ JsonValue::Object(_)) => last.clone(),
                    _ => JsonValue::from(NEW_VALUE_PLACEHOLDER),
                };
                elements.push(seed);
                Ok(path.child(elements.len() - 1))
            }
            _ => Err(EditError::NotAContainer {
                path: path.to_string(),
                expected: "an array",
            }),
        }
    }

    /// Appends `key: "new_value"` to the object at `path` and returns its path.
    ///
    /// Existing keys are never overwritten.
    pub fn insert_object_member(
        &mut self,
        path: &JsonPath,
        key: &str,
    ) -> Result<JsonPath, EditError> {
        match self.get_mut(path)? {
            JsonValue::Object(entries) => {
                if entries.contains_key(key) {
                    return Err(EditError::DuplicateKey(key.to_string()));
                }
                entries.insert(key.to_string(), JsonValue::from(NEW_VALUE_PLACEHOLDER));
                Ok(path.child(key))
            }
            _ => Err(EditError::NotAContainer {
                path: path.to_string(),
                expected: "an object",
            }),
        }
    }

    /// Deletes the node at `path` and returns the removed value.
    ///
    /// Object members are removed preserving the order of the others; array
    /// elements after the removed one shift down by one index.
    pub fn delete_node(&mut self, path: &JsonPath) -> Result<JsonValue, EditError> {
        let (parent_path, last) = path.split_last().ok_or(EditError::RootDeletion)?;
        let parent = self.get_mut(&parent_path)?;

        let removed = match (parent, last) {
            (JsonValue::Object(entries), PathSegment::Key(key)) => entries.shift_remove(key),
            (JsonValue::Array(elements), PathSegment::Index(index)) if *index < elements.len() => {
                Some(elements.remove(*index))
            }
            _ => None,
        };

        removed.ok_or_else(|| {
            EditError::path(path, "no node to delete at this position")
        })
    }

    /// Installs a new root, discarding the previous document value.
    pub fn replace_root(&mut self, root: JsonValue) {
        self.root = root;
    }

    /// Converts an RFC 6901 pointer into a `JsonPath` against this document.
    ///
    /// Tokens landing in an object become keys; tokens landing in an array
    /// must be non-negative decimal indices.
    pub fn path_from_pointer(&self, pointer: &str) -> Result<JsonPath, EditError> {
        let tokens = pointer_tokens(pointer)
            .ok_or_else(|| EditError::path(pointer, "pointer must be empty or start with '/'"))?;

        let mut path = JsonPath::root();
        let mut current = &self.root;
        for token in tokens {
            let segment = match current {
                JsonValue::Array(_) => {
                    let valid = !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit());
                    let index = token
                        .parse::<usize>()
                        .ok()
                        .filter(|_| valid)
                        .ok_or_else(|| {
                            EditError::path(
                                path.child(token.as_str()),
                                "array index must be a non-negative integer",
                            )
                        })?;
                    PathSegment::Index(index)
                }
                _ => PathSegment::Key(token),
            };
            path = path.child(segment);
            current = self.get(&path)?;
        }
        Ok(path)
    }
}

fn step<'a>(node: &'a JsonValue, segment: &PathSegment) -> Result<&'a JsonValue, String> {
    match (node, segment) {
        (JsonValue::Object(entries), PathSegment::Key(key)) => entries
            .get(key)
            .ok_or_else(|| format!("key '{}' not found", key)),
        (JsonValue::Array(elements), PathSegment::Index(index)) => {
            let len = elements.len();
            elements.get(*index).ok_or_else(|| {
                format!("index {} out of range for array of length {}", index, len)
            })
        }
        (other, segment) => Err(mismatch(other, segment)),
    }
}

fn step_mut<'a>(
    node: &'a mut JsonValue,
    segment: &PathSegment,
) -> Result<&'a mut JsonValue, String> {
    match (node, segment) {
        (JsonValue::Object(entries), PathSegment::Key(key)) => entries
            .get_mut(key)
            .ok_or_else(|| format!("key '{}' not found", key)),
        (JsonValue::Array(elements), PathSegment::Index(index)) => {
            let len = elements.len();
            elements.get_mut(*index).ok_or_else(|| {
                format!("index {} out of range for array of length {}", index, len)
            })
        }
        (other, segment) => Err(mismatch(other, segment)),
    }
}

fn mismatch(node: &JsonValue, segment: &PathSegment) -> String {
    match segment {
        PathSegment::Key(key) => format!("cannot look up key '{}' in {}", key, node.type_name()),
        PathSegment::Index(index) => {
            format!("cannot look up index {} in {}", index, node.type_name())
        }
    }
}
