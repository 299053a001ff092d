//! Use case orchestration for modsan.
//!
//! This crate provides the application layer: use cases that coordinate the domain, repo, and
//! settings layers. It is intentionally thin and delegates heavy lifting to the appropriate layers.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod render;
mod report;
mod run;
mod sanitize;

pub use render::render_markdown;
pub use report::{
    parse_report_json, report_exit_code, runtime_error_report, serialize_report,
    verdict_exit_code,
};
pub use run::{RunInput, RunOutput, run_sanitize};
pub use sanitize::{SanitizeOptions, SanitizeSummary, sanitize_file, sanitize_path};
