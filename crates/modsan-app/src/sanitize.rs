//! The `sanitize` use case for a single module metadata file.

use camino::Utf8Path;
use modsan_domain::{ExclusionSet, Removal};
use modsan_types::{Coordinate, RunMode, SanitizeError, ids};
use tracing::{debug, info};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SanitizeOptions {
    /// Spaces per indentation level in the rewritten file.
    pub indent: usize,
    pub mode: RunMode,
}

impl Default for SanitizeOptions {
    fn default() -> Self {
        Self {
            indent: ids::DEFAULT_INDENT,
            mode: RunMode::Write,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SanitizeSummary {
    pub removed: Vec<Removal>,
    /// False in check mode.
    pub written: bool,
}

impl SanitizeSummary {
    pub fn is_changed(&self) -> bool {
        !self.removed.is_empty()
    }
}

/// Strip every `exclude` dependency from the metadata at `path` and overwrite it.
///
/// The file is replaced in full on success and left untouched on any error.
pub fn sanitize_file(
    path: &Utf8Path,
    exclude: &Coordinate,
) -> Result<SanitizeSummary, SanitizeError> {
    sanitize_path(
        path,
        &ExclusionSet::single(exclude.clone()),
        SanitizeOptions::default(),
    )
}

/// Parse, filter, and (in write mode) rewrite one file.
pub fn sanitize_path(
    path: &Utf8Path,
    exclusions: &ExclusionSet,
    options: SanitizeOptions,
) -> Result<SanitizeSummary, SanitizeError> {
    let document = modsan_repo::load_document(path)?;

    let sanitized =
        modsan_domain::sanitize(&document, exclusions).map_err(|source| SanitizeError::Schema {
            path: path.to_owned(),
            source,
        })?;

    for removal in &sanitized.removed {
        info!(
            %path,
            pointer = %removal.pointer,
            dependency = %removal.coordinate,
            variant = removal.variant.as_deref().unwrap_or("-"),
            "removing dependency entry"
        );
    }

    let written = match options.mode {
        RunMode::Write => {
            modsan_repo::write_document(path, &sanitized.document, options.indent)?;
            true
        }
        RunMode::Check => false,
    };
    debug!(%path, removed = sanitized.removed.len(), written, "sanitized");

    Ok(SanitizeSummary {
        removed: sanitized.removed,
        written,
    })
}
