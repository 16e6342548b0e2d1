//! JSONQuill - a structural JSON editor core.
//!
//! A JSON document is held as a tree of `JsonValue`s and edited through
//! structural paths. Structural edits (insert, delete) are validated and
//! applied atomically; an optional structure lock restricts editing to
//! type-preserving value changes.
//!
//! # Modules
//!
//! - `document`: the value tree, paths, parsing, serialization, formatting
//! - `editor`: node index, lock policy, and the edit session
//! - `file`: loading and saving documents
//! - `config`: user configuration
//! - `input`: the line-oriented command driver
//! - `error`: the editing error taxonomy

pub mod config;
pub mod document;
pub mod editor;
pub mod error;
pub mod file;
pub mod input;

pub use error::EditError;
