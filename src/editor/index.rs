//! Node index: transient ids for every node in the document.
//!
//! This module provides:
//! - `NodeId`: an opaque id handed to a presentation layer (one per tree row)
//! - `IndexEntry`: a single indexed node with its path and display data
//! - `NodeIndex`: the arena of entries, rebuilt wholesale from the document
//!
//! The index is never patched. After any structural edit it is rebuilt with a
//! full depth-first walk and every id from the previous build stops
//! resolving. Ids increase monotonically across rebuilds of the same index,
//! so a stale id can never alias a node from a later build.

use std::fmt;

use crate::document::format::{format_value, truncate_preview};
use crate::document::node::JsonValue;
use crate::document::path::JsonPath;
use crate::document::tree::JsonTree;
use crate::error::EditError;

/// Maximum length of a leaf preview in an index entry.
const PREVIEW_WIDTH: usize = 60;

/// Opaque identifier for one node of one index build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Classification of JSON value types for display purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Object,
    Array,
    String,
    Number,
    Boolean,
    Null,
}

impl ValueType {
    pub fn from_json_value(value: &JsonValue) -> Self {
        match value {
            JsonValue::Object(_) => ValueType::Object,
            JsonValue::Array(_) => ValueType::Array,
            JsonValue::String(_) => ValueType::String,
            JsonValue::Number(_) => ValueType::Number,
            JsonValue::Boolean(_) => ValueType::Boolean,
            JsonValue::Null => ValueType::Null,
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, ValueType::Object | ValueType::Array)
    }
}

/// One node in the index.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexEntry {
    pub id: NodeId,
    /// Path to this node at the time of the build
    pub path: JsonPath,
    /// 0 for the root
    pub depth: usize,
    /// Object key, `[i]` for array elements, `$` for the root
    pub label: String,
    pub value_type: ValueType,
    /// Formatted value, or a size preview for containers
    pub preview: String,
}

/// Arena of `IndexEntry`s in depth-first order.
///
/// # Example
///
/// ```
/// use jsonquill::document::parser::parse_json;
/// use jsonquill::editor::index::NodeIndex;
///
/// let tree = parse_json(r#"{"name": "Alice", "tags": ["a", "b"]}"#).unwrap();
/// let mut index = NodeIndex::new();
/// index.rebuild(&tree);
///
/// // root, name, tags, tags[0], tags[1]
/// assert_eq!(index.len(), 5);
/// let labels: Vec<&str> = index.entries().iter().map(|e| e.label.as_str()).collect();
/// assert_eq!(labels, vec!["$", "name", "tags", "[0]", "[1]"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct NodeIndex {
    entries: Vec<IndexEntry>,
    /// Id of `entries[0]` in the current build
    first_id: u64,
    /// Next id to hand out; never decreases
    next_id: u64,
}

impl NodeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an index for `tree` in one call.
    pub fn build(tree: &JsonTree) -> Self {
        let mut index = Self::new();
        index.rebuild(tree);
        index
    }

    /// Discards every entry and re-walks the document, assigning fresh ids.
    ///
    /// Object members are visited in insertion order and array elements in
    /// index order; each node is visited before its children.
    pub fn rebuild(&mut self, tree: &JsonTree) {
        self.entries.clear();
        self.first_id = self.next_id;
        self.visit(tree.root(), JsonPath::root(), "$".to_string());
    }

    /// Empties the index without a document (no document loaded).
    pub fn clear(&mut self) {
        self.entries.clear();
        self.first_id = self.next_id;
    }

    fn visit(&mut self, value: &JsonValue, path: JsonPath, label: String) {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.entries.push(IndexEntry {
            id,
            depth: path.len(),
            path: path.clone(),
            label,
            value_type: ValueType::from_json_value(value),
            preview: preview(value),
        });

        match value {
            JsonValue::Object(entries) => {
                for (key, child) in entries {
                    self.visit(child, path.child(key.as_str()), key.clone());
                }
            }
            JsonValue::Array(elements) => {
                for (i, child) in elements.iter().enumerate() {
                    self.visit(child, path.child(i), format!("[{}]", i));
                }
            }
            JsonValue::String(_)
            | JsonValue::Number(_)
            | JsonValue::Boolean(_)
            | JsonValue::Null => {}
        }
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up the entry for `id` in the current build.
    pub fn entry(&self, id: NodeId) -> Option<&IndexEntry> {
        let offset = id.0.checked_sub(self.first_id)?;
        self.entries.get(usize::try_from(offset).ok()?)
    }

    /// Resolves `id` to the path it was assigned in the current build.
    ///
    /// Fails with `EditError::UnknownNode` for ids from an earlier build or
    /// ids never issued.
    pub fn resolve(&self, id: NodeId) -> Result<&JsonPath, EditError> {
        self.entry(id)
            .map(|entry| &entry.path)
            .ok_or(EditError::UnknownNode(id))
    }

    /// Returns the id currently assigned to `path`, if any.
    pub fn find_path(&self, path: &JsonPath) -> Option<NodeId> {
        self.entries
            .iter()
            .find(|entry| &entry.path == path)
            .map(|entry| entry.id)
    }

    /// Refreshes the preview of one node after a leaf update.
    ///
    /// Leaf updates don't change the shape, so ids and paths stay valid and
    /// only the displayed value needs replacing.
    pub fn refresh_entry(&mut self, path: &JsonPath, value: &JsonValue) {
        if let Some(entry) = self.entries.iter_mut().find(|entry| &entry.path == path) {
            entry.value_type = ValueType::from_json_value(value);
            entry.preview = preview(value);
        }
    }
}

fn preview(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => truncate_preview(&format!("\"{}\"", s), PREVIEW_WIDTH),
        other => truncate_preview(&format_value(other), PREVIEW_WIDTH),
    }
}
