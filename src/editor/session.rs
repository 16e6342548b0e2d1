//! Edit session management.
//!
//! This module provides the `EditSession` struct that holds all runtime state
//! for editing one document: the document itself, the node index handed out
//! to the presentation layer, the active selection, the structure lock, and
//! the latest status message.
//!
//! The session is the only place that knows about the lock. The document
//! model accepts any well-formed mutation; the session refuses structural
//! edits while locked and coerces leaf input to the leaf's type.
//!
//! # Example
//!
//! ```
//! use jsonquill::document::parser::parse_json;
//! use jsonquill::document::node::JsonValue;
//! use jsonquill::document::path::JsonPath;
//! use jsonquill::editor::session::{EditSession, LeafInput};
//!
//! let tree = parse_json(r#"{"count": 42}"#).unwrap();
//! let mut session = EditSession::new(tree);
//!
//! let id = session.index().find_path(&JsonPath::root().child("count")).unwrap();
//! session.select(id).unwrap();
//!
//! session.toggle_lock();
//! assert!(session.update_active_leaf(LeafInput::Text("abc".into())).is_err());
//! let updated = session.update_active_leaf(LeafInput::Text("43".into())).unwrap();
//! assert_eq!(updated, Some(JsonValue::from(43i64)));
//! ```

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;

use super::index::{NodeId, NodeIndex};
use super::lock::LockPolicy;
use crate::config::Config;
use crate::document::node::{JsonNumber, JsonValue};
use crate::document::path::JsonPath;
use crate::document::parser::parse_json;
use crate::document::serializer::serialize_with_indent;
use crate::document::tree::{DocumentOrigin, JsonTree};
use crate::error::EditError;
use crate::file::loader::{load_json_file, load_json_from_reader};
use crate::file::saver::save_json_file;

/// Represents a message to display to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub level: MessageLevel,
}

/// Message severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Warning,
    Error,
}

/// Raw input for a leaf update.
///
/// Strings and numbers are edited as free text; booleans through a toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeafInput {
    Text(String),
    Flag(bool),
}

const NOTHING_SELECTED: &str = "Nothing selected.";

/// Runtime state for editing a single document.
#[derive(Debug, Default)]
pub struct EditSession {
    /// `None` when no document is loaded (e.g. after a failed load)
    tree: Option<JsonTree>,
    index: NodeIndex,
    active: Option<JsonPath>,
    lock: LockPolicy,
    message: Option<Message>,
}

impl EditSession {
    /// Creates an unlocked session editing `tree`, with nothing selected.
    pub fn new(tree: JsonTree) -> Self {
        let index = NodeIndex::build(&tree);
        Self {
            tree: Some(tree),
            index,
            active: None,
            lock: LockPolicy::Unlocked,
            message: None,
        }
    }

    /// Creates a session with no document loaded.
    pub fn empty() -> Self {
        Self {
            message: Some(Message {
                text: "No file loaded.".to_string(),
                level: MessageLevel::Info,
            }),
            ..Self::default()
        }
    }

    /// Sets the initial lock policy.
    pub fn with_lock(mut self, lock: LockPolicy) -> Self {
        self.lock = lock;
        self
    }

    pub fn tree(&self) -> Option<&JsonTree> {
        self.tree.as_ref()
    }

    pub fn has_document(&self) -> bool {
        self.tree.is_some()
    }

    /// The index for the current document.
    ///
    /// Ids from any earlier index stop resolving after a structural edit;
    /// presentation layers re-read this after every structural call.
    pub fn index(&self) -> &NodeIndex {
        &self.index
    }

    pub fn active_path(&self) -> Option<&JsonPath> {
        self.active.as_ref()
    }

    pub fn lock(&self) -> LockPolicy {
        self.lock
    }

    pub fn is_locked(&self) -> bool {
        self.lock.is_locked()
    }

    /// Returns the current message, if any.
    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    /// Sets a message to display to the user.
    pub fn set_message(&mut self, text: String, level: MessageLevel) {
        self.message = Some(Message { text, level });
    }

    /// Clears the current message.
    pub fn clear_message(&mut self) {
        self.message = None;
    }

    /// Makes the node `id` the active edit target and returns its path.
    pub fn select(&mut self, id: NodeId) -> Result<JsonPath, EditError> {
        match self.index.resolve(id).cloned() {
            Ok(path) => {
                self.active = Some(path.clone());
                self.clear_message();
                Ok(path)
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Selects nothing.
    pub fn clear_selection(&mut self) {
        self.active = None;
    }

    /// Returns the active node's value, or `None` if nothing is selected.
    pub fn active_value(&self) -> Result<Option<&JsonValue>, EditError> {
        match (&self.tree, &self.active) {
            (Some(tree), Some(path)) => tree.get(path).map(Some),
            _ => Ok(None),
        }
    }

    /// Updates the active leaf from raw input and returns the stored value.
    ///
    /// Returns `Ok(None)` if nothing is selected. Booleans take the supplied
    /// flag in either lock mode. Numbers and strings are coerced to their
    /// current type while locked; unlocked, text is stored verbatim as a
    /// string. Null leaves and containers are not editable here.
    pub fn update_active_leaf(
        &mut self,
        input: LeafInput,
    ) -> Result<Option<JsonValue>, EditError> {
        let lock = self.lock;
        let outcome = match (self.tree.as_mut(), self.active.as_ref()) {
            (Some(tree), Some(path)) => Some(
                tree.get(path)
                    .and_then(|current| coerce_leaf(current, input, lock))
                    .and_then(|value| {
                        tree.set_leaf(path, value.clone())
                            .map(|()| (path.clone(), value))
                    }),
            ),
            _ => None,
        };

        let Some(result) = outcome else {
            self.set_message(NOTHING_SELECTED.to_string(), MessageLevel::Warning);
            return Ok(None);
        };

        match result {
            Ok((path, value)) => {
                self.index.refresh_entry(&path, &value);
                self.set_message(
                    "Value updated successfully.".to_string(),
                    MessageLevel::Info,
                );
                Ok(Some(value))
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Flips the structure lock. Never touches the document.
    pub fn toggle_lock(&mut self) -> LockPolicy {
        let lock = self.lock.toggle();
        self.set_message(lock.status_text().to_string(), MessageLevel::Info);
        lock
    }

    /// Appends a seed element to the active array.
    ///
    /// Returns the new element's path, or `None` if nothing is selected.
    pub fn insert_array_element(&mut self) -> Result<Option<JsonPath>, EditError> {
        self.ensure_unlocked()?;
        let Some((tree, path)) = self.structural_target() else {
            return Ok(None);
        };

        match tree.insert_array_element(&path) {
            Ok(new_path) => {
                self.rebuild_index();
                self.set_message("Element added.".to_string(), MessageLevel::Info);
                Ok(Some(new_path))
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Adds `key: "new_value"` to the active object.
    ///
    /// Returns the new member's path, or `None` if nothing is selected.
    pub fn insert_object_member(&mut self, key: &str) -> Result<Option<JsonPath>, EditError> {
        self.ensure_unlocked()?;
        let Some((tree, path)) = self.structural_target() else {
            return Ok(None);
        };

        match tree.insert_object_member(&path, key) {
            Ok(new_path) => {
                self.rebuild_index();
                self.set_message("Key-value pair added.".to_string(), MessageLevel::Info);
                Ok(Some(new_path))
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Deletes the active node and clears the selection.
    ///
    /// Deleting the root fails with `RootDeletion` whether or not the
    /// structure is locked. Returns the removed value, or `None` if nothing is
    /// selected.
    pub fn delete_active(&mut self) -> Result<Option<JsonValue>, EditError> {
        if self.tree.is_some() && self.active.as_ref().is_some_and(JsonPath::is_root) {
            return Err(self.fail(EditError::RootDeletion));
        }
        self.ensure_unlocked()?;
        let Some((tree, path)) = self.structural_target() else {
            return Ok(None);
        };

        match tree.delete_node(&path) {
            Ok(removed) => {
                self.active = None;
                self.rebuild_index();
                let name = path.last().map(ToString::to_string).unwrap_or_default();
                self.set_message(format!("Deleted: {}", name), MessageLevel::Info);
                Ok(Some(removed))
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Replaces the document with the sample "new file" document.
    pub fn new_document(&mut self) {
        self.replace_document(JsonTree::sample());
        self.set_message(
            "New file created. Edit and save.".to_string(),
            MessageLevel::Info,
        );
    }

    /// Installs `tree` as the current document, discarding the old one.
    pub fn replace_document(&mut self, tree: JsonTree) {
        self.index.rebuild(&tree);
        self.tree = Some(tree);
        self.active = None;
    }

    /// Replaces only the root value of the current document, keeping its
    /// origin. Starts a fresh document if none is loaded.
    pub fn replace_root(&mut self, root: JsonValue) {
        match &mut self.tree {
            Some(tree) => tree.replace_root(root),
            None => self.tree = Some(JsonTree::new(root)),
        }
        self.active = None;
        self.rebuild_index();
    }

    /// Parses `text` and installs it as a fresh document.
    ///
    /// On failure no document is loaded afterwards.
    pub fn load_str(&mut self, text: &str) -> Result<(), EditError> {
        match parse_json(text) {
            Ok(tree) => {
                self.replace_document(tree);
                self.set_message("Document loaded.".to_string(), MessageLevel::Info);
                Ok(())
            }
            Err(err) => {
                self.unload();
                Err(self.fail(err))
            }
        }
    }

    /// Loads a document from disk.
    ///
    /// On failure no document is loaded afterwards.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        match load_json_file(path) {
            Ok(tree) => {
                self.replace_document(tree);
                self.set_message(format!("Loaded: {}", path.display()), MessageLevel::Info);
                Ok(())
            }
            Err(err) => {
                self.unload();
                self.set_message(
                    format!("Error: Failed to read or parse file. {:#}", err),
                    MessageLevel::Error,
                );
                Err(err)
            }
        }
    }

    /// Loads a document from a reader such as stdin.
    ///
    /// The document has no origin, so it can only be saved with an explicit
    /// path. On failure no document is loaded afterwards.
    pub fn load_reader<R: Read>(&mut self, reader: R) -> anyhow::Result<()> {
        match load_json_from_reader(reader) {
            Ok(tree) => {
                self.replace_document(tree);
                self.set_message("Document loaded.".to_string(), MessageLevel::Info);
                Ok(())
            }
            Err(err) => {
                self.unload();
                self.set_message(
                    format!("Error: Failed to read or parse input. {:#}", err),
                    MessageLevel::Error,
                );
                Err(err)
            }
        }
    }

    /// Saves the document to `path`, or to the file it was loaded from.
    ///
    /// A successful save records `path` as the document's origin.
    pub fn save(&mut self, path: Option<&Path>, config: &Config) -> anyhow::Result<PathBuf> {
        let result = self.try_save(path, config);
        match &result {
            Ok(target) => self.set_message(
                format!("File saved successfully to {}", target.display()),
                MessageLevel::Info,
            ),
            Err(err) => self.set_message(format!("Error saving file: {:#}", err), MessageLevel::Error),
        }
        result
    }

    fn try_save(&mut self, path: Option<&Path>, config: &Config) -> anyhow::Result<PathBuf> {
        let tree = self.tree.as_mut().context("No data to save.")?;
        let target = match path {
            Some(path) => path.to_path_buf(),
            None => tree
                .origin()
                .path()
                .map(Path::to_path_buf)
                .context("No file name given and the document was never saved")?,
        };
        save_json_file(&target, tree, config)?;
        tree.set_origin(DocumentOrigin::Loaded(target.clone()));
        Ok(target)
    }

    /// Serializes the current document, if any.
    pub fn serialize(&self, indent_size: usize) -> Option<String> {
        self.tree
            .as_ref()
            .map(|tree| serialize_with_indent(tree, indent_size))
    }

    fn unload(&mut self) {
        self.tree = None;
        self.active = None;
        self.index.clear();
    }

    fn rebuild_index(&mut self) {
        match &self.tree {
            Some(tree) => self.index.rebuild(tree),
            None => self.index.clear(),
        }
    }

    fn ensure_unlocked(&mut self) -> Result<(), EditError> {
        if self.lock.is_locked() {
            return Err(self.fail(EditError::StructureLocked));
        }
        Ok(())
    }

    /// The document and active path for a structural edit, or `None` (with a
    /// status message) if nothing is selected.
    fn structural_target(&mut self) -> Option<(&mut JsonTree, JsonPath)> {
        if self.tree.is_none() || self.active.is_none() {
            self.set_message(NOTHING_SELECTED.to_string(), MessageLevel::Warning);
            return None;
        }
        let path = self.active.clone()?;
        self.tree.as_mut().map(|tree| (tree, path))
    }

    fn fail(&mut self, err: EditError) -> EditError {
        self.set_message(format!("Error: {}", err), MessageLevel::Error);
        err
    }
}

/// Computes the value to store for `input` given the leaf's current value.
fn coerce_leaf(
    current: &JsonValue,
    input: LeafInput,
    lock: LockPolicy,
) -> Result<JsonValue, EditError> {
    match current {
        JsonValue::Boolean(_) => match input {
            LeafInput::Flag(b) => Ok(JsonValue::Boolean(b)),
            LeafInput::Text(text) => match text.trim() {
                "true" => Ok(JsonValue::Boolean(true)),
                "false" => Ok(JsonValue::Boolean(false)),
                _ => Err(EditError::type_mismatch("boolean")),
            },
        },
        JsonValue::Null => Err(EditError::TypeMismatch(
            "null values are read-only".to_string(),
        )),
        JsonValue::Object(_) | JsonValue::Array(_) => Err(EditError::TypeMismatch(
            "containers cannot be edited as values".to_string(),
        )),
        JsonValue::Number(_) | JsonValue::String(_) if !lock.is_locked() => match input {
            LeafInput::Text(text) => Ok(JsonValue::String(text)),
            LeafInput::Flag(b) => Ok(JsonValue::Boolean(b)),
        },
        // Integer leaves stay integers and float leaves stay floats.
        JsonValue::Number(number) => match input {
            LeafInput::Text(text) => {
                let parsed = if number.is_integer() {
                    JsonNumber::parse_integer(&text)
                } else {
                    JsonNumber::parse_float(&text)
                };
                parsed
                    .map(JsonValue::Number)
                    .ok_or_else(|| EditError::type_mismatch("number"))
            }
            LeafInput::Flag(_) => Err(EditError::type_mismatch("number")),
        },
        JsonValue::String(_) => match input {
            LeafInput::Text(text) => Ok(JsonValue::String(text)),
            LeafInput::Flag(_) => Err(EditError::type_mismatch("string")),
        },
    }
}
