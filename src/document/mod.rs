//! The JSON document model.
//!
//! - `node`: the `JsonValue` tagged union
//! - `path`: structural paths (`JsonPath`) and JSON Pointer handling
//! - `tree`: the path-addressed document (`JsonTree`) and its mutations
//! - `parser` / `serializer`: conversion to and from JSON text
//! - `format`: display strings for values

pub mod format;
pub mod node;
pub mod parser;
pub mod path;
pub mod serializer;
pub mod tree;
