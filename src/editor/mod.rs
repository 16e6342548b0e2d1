//! Editing on top of the document model.
//!
//! # Modules
//!
//! - `index`: transient node ids for every node, rebuilt after structural edits
//! - `lock`: the structure lock policy
//! - `session`: selection, validated updates, and status messages
//!
//! # Example
//!
//! ```
//! use jsonquill::editor::lock::LockPolicy;
//!
//! // Sessions start unlocked
//! assert_eq!(LockPolicy::default(), LockPolicy::Unlocked);
//! ```

pub mod index;
pub mod lock;
pub mod session;
