use crate::document::NodeKind;
use camino::Utf8PathBuf;

/// A well-formed document whose shape does not match module metadata.
///
/// `pointer` is an RFC 6901 JSON pointer to the offending node (`""` is the root).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("expected {expected} at `{pointer}`, found {found}")]
pub struct SchemaError {
    pub pointer: String,
    pub expected: NodeKind,
    pub found: NodeKind,
}

/// Failure of a single sanitize invocation. All variants are fatal for that file.
#[derive(Debug, thiserror::Error)]
pub enum SanitizeError {
    #[error("{action} {path}")]
    Io {
        action: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed document {path}")]
    Parse {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected document shape in {path}")]
    Schema {
        path: Utf8PathBuf,
        #[source]
        source: SchemaError,
    },
}

impl SanitizeError {
    pub fn path(&self) -> &camino::Utf8Path {
        match self {
            SanitizeError::Io { path, .. }
            | SanitizeError::Parse { path, .. }
            | SanitizeError::Schema { path, .. } => path,
        }
    }
}
