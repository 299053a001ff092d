//! Pure module metadata filtering (no IO).
//!
//! Input: a parsed document and the exclusion set.
//! Output: the rebuilt document plus a record of every removed dependency entry.

#![forbid(unsafe_code)]

pub mod exclusion;
pub mod pointer;
pub mod prune;

mod sanitize;

pub use exclusion::ExclusionSet;
pub use pointer::Pointer;
pub use prune::{DEPENDENCY_ENTRIES, Step, prune};
pub use sanitize::{Removal, Sanitized, sanitize};

#[cfg(test)]
mod proptest;
