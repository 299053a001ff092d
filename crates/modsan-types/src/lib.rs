//! Stable DTOs and IDs used across the modsan workspace.
//!
//! This crate is intentionally boring:
//! - the order-preserving document tree used for module metadata
//! - dependency coordinates
//! - the sanitize error taxonomy
//! - data types for the emitted run report
//! - stable string IDs and defaults

#![forbid(unsafe_code)]

pub mod coordinate;
pub mod document;
pub mod error;
pub mod ids;
pub mod path;
pub mod receipt;

pub use coordinate::Coordinate;
pub use document::{Node, NodeKind, Object, parse_document, to_pretty_bytes};
pub use error::{SanitizeError, SchemaError};
pub use path::RepoPath;
pub use receipt::{
    FileOutcome, FileReport, RemovedEntry, ReportData, RunMode, SCHEMA_REPORT_V1, SanitizeReport,
    ToolMeta, Verdict,
};
