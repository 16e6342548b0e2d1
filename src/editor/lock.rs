//! Structure lock policy.
//!
//! The lock is a user-facing edit permission, not mutual exclusion. While
//! locked, structural edits (insert and delete) are refused and leaf updates
//! must keep the leaf's type.
//!
//! # Example
//!
//! ```
//! use jsonquill::editor::lock::LockPolicy;
//!
//! let mut lock = LockPolicy::default();
//! assert_eq!(lock, LockPolicy::Unlocked);
//!
//! lock.toggle();
//! assert!(lock.is_locked());
//! assert_eq!(format!("{}", lock), "LOCKED");
//! ```

use std::fmt;

/// Whether structural edits are currently permitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockPolicy {
    /// Full editing: structure may change and leaves may change type.
    #[default]
    Unlocked,
    /// Value-only editing: no inserts or deletes, leaf types preserved.
    Locked,
}

impl LockPolicy {
    pub fn from_flag(locked: bool) -> Self {
        if locked {
            LockPolicy::Locked
        } else {
            LockPolicy::Unlocked
        }
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, LockPolicy::Locked)
    }

    /// Flips the policy and returns the new value.
    pub fn toggle(&mut self) -> Self {
        *self = match self {
            LockPolicy::Unlocked => LockPolicy::Locked,
            LockPolicy::Locked => LockPolicy::Unlocked,
        };
        *self
    }

    /// Status text announcing this policy.
    pub fn status_text(&self) -> &'static str {
        match self {
            LockPolicy::Locked => "Structure is LOCKED. Editing is restricted to values only.",
            LockPolicy::Unlocked => "Structure is UNLOCKED. Full editing enabled.",
        }
    }
}

impl fmt::Display for LockPolicy {
    /// Formats the policy as an uppercase string suitable for a status bar.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockPolicy::Unlocked => write!(f, "UNLOCKED"),
            LockPolicy::Locked => write!(f, "LOCKED"),
        }
    }
}
