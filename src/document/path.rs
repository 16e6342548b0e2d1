//! Structural paths into a JSON document.
//!
//! A `JsonPath` is an ordered sequence of segments leading from the root to a
//! node: object member keys and array indices. The empty path is the root.
//!
//! Paths are weak references. Deleting `[0]` from an array shifts every later
//! index down by one, so a path computed before a structural edit may point
//! at a different node, or at nothing, afterwards. Paths are therefore
//! resolved on demand and never cached across a mutation; resolving a stale
//! path fails with `EditError::Path` instead of reaching the wrong node
//! silently whenever the shape no longer matches.
//!
//! # Example
//!
//! ```
//! use jsonquill::document::path::{JsonPath, PathSegment};
//!
//! let path = JsonPath::root().child("items").child(0usize).child("name");
//! assert_eq!(path.to_string(), "/items/0/name");
//! assert_eq!(path.to_display_path(), "$.items[0].name");
//! assert_eq!(path.last(), Some(&PathSegment::Key("name".to_string())));
//! ```

use std::fmt;

/// One step in a path: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "{}", key),
            PathSegment::Index(index) => write!(f, "{}", index),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// An address of a node relative to the document root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct JsonPath {
    segments: Vec<PathSegment>,
}

impl JsonPath {
    /// The empty path, addressing the root.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// Returns a new path extended by one segment.
    pub fn child(&self, segment: impl Into<PathSegment>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    /// Splits off the last segment, returning the parent path and that segment.
    ///
    /// Returns `None` for the root.
    pub fn split_last(&self) -> Option<(JsonPath, &PathSegment)> {
        let (last, parent) = self.segments.split_last()?;
        Some((JsonPath::new(parent.to_vec()), last))
    }

    /// Renders the path in `$.key[0]` form for status messages.
    pub fn to_display_path(&self) -> String {
        let mut out = String::from("$");
        for segment in &self.segments {
            match segment {
                PathSegment::Key(key) => {
                    let plain = !key.is_empty()
                        && key.chars().all(|c| c.is_alphanumeric() || c == '_');
                    if plain {
                        out.push('.');
                        out.push_str(key);
                    } else {
                        out.push_str(&format!("['{}']", key.replace('\'', "\\'")));
                    }
                }
                PathSegment::Index(index) => out.push_str(&format!("[{}]", index)),
            }
        }
        out
    }
}

impl From<Vec<PathSegment>> for JsonPath {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self::new(segments)
    }
}

/// Formats the path as an RFC 6901 JSON Pointer (`""` for the root).
impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "/{}", escape_component(&segment.to_string()))?;
        }
        Ok(())
    }
}

/// Escapes one JSON Pointer token.
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    component.replace('~', "~0").replace('/', "~1")
}

/// Unescapes one JSON Pointer token.
pub fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    component.replace("~1", "/").replace("~0", "~")
}

/// Splits a JSON Pointer into unescaped raw tokens.
///
/// Whether a token is a key or an index depends on the container it lands
/// in, so turning tokens into a `JsonPath` is done against a document by
/// `JsonTree::path_from_pointer`. Returns `None` if the pointer is neither
/// empty nor absolute.
pub fn pointer_tokens(pointer: &str) -> Option<Vec<String>> {
    if pointer.is_empty() {
        return Some(Vec::new());
    }
    let rest = pointer.strip_prefix('/')?;
    Some(rest.split('/').map(unescape_component).collect())
}
