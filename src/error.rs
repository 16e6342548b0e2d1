//! Error types for document editing.
//!
//! Every editing operation either succeeds or fails with exactly one
//! `EditError` variant. All of them are recoverable: the document is left
//! unchanged and the session reports the error text as a status message.

use thiserror::Error;

use crate::editor::index::NodeId;

/// Errors raised by the document model, the node index, and the edit session.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EditError {
    /// The input text is not valid JSON.
    #[error("Failed to parse JSON: {0}")]
    Parse(String),
    /// The input bytes are not valid UTF-8.
    #[error("Failed to decode input: {0}")]
    Encoding(String),
    /// A path does not resolve against the current document.
    #[error("Path '{path}' does not resolve: {reason}")]
    Path { path: String, reason: String },
    /// An insert targeted something other than the required container.
    #[error("Node at '{path}' is not {expected}")]
    NotAContainer {
        path: String,
        expected: &'static str,
    },
    /// An object member with this key already exists.
    #[error("Key '{0}' already exists")]
    DuplicateKey(String),
    /// The root node may never be deleted.
    #[error("Cannot delete the root element")]
    RootDeletion,
    /// A node id that is not in the current index (stale or never issued).
    #[error("Unknown node id {0}")]
    UnknownNode(NodeId),
    /// Locked-mode coercion failed, or the leaf is not editable.
    #[error("{0}")]
    TypeMismatch(String),
    /// A structural edit was attempted while the structure is locked.
    #[error("Structure is locked")]
    StructureLocked,
    /// A float in the document is NaN or infinite.
    #[error("Number at '{0}' is not finite and cannot be written as JSON")]
    NonFiniteNumber(String),
}

impl EditError {
    pub(crate) fn path(path: impl ToString, reason: impl Into<String>) -> Self {
        EditError::Path {
            path: path.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn type_mismatch(type_name: &str) -> Self {
        EditError::TypeMismatch(format!("value must be of type {}", type_name))
    }
}
