//! Repository adapters: locate module metadata files, load them, and rewrite them in place.
//!
//! This crate is allowed to do filesystem IO. It never decides what to filter; that is
//! the domain crate's job.

#![forbid(unsafe_code)]

mod discover;
mod io;

pub use discover::{discover_module_files, module_file_path};
pub use io::{load_document, replace_file, write_document};
