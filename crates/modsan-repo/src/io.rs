use camino::Utf8Path;
use modsan_types::{Node, SanitizeError, parse_document, to_pretty_bytes};
use std::io::Write;
use std::path::Path;
use tracing::{debug, warn};

fn io_error(action: &'static str, path: &Utf8Path, source: std::io::Error) -> SanitizeError {
    SanitizeError::Io {
        action,
        path: path.to_owned(),
        source,
    }
}

/// Read and parse a module metadata document.
pub fn load_document(path: &Utf8Path) -> Result<Node, SanitizeError> {
    let text = std::fs::read_to_string(path).map_err(|e| io_error("read", path, e))?;
    debug!(%path, bytes = text.len(), "read module metadata");
    parse_document(&text).map_err(|source| SanitizeError::Parse {
        path: path.to_owned(),
        source,
    })
}

/// Pretty-print `document` and atomically replace `path` with it.
pub fn write_document(path: &Utf8Path, document: &Node, indent: usize) -> Result<(), SanitizeError> {
    let bytes = to_pretty_bytes(document, indent)
        .map_err(|e| io_error("encode", path, std::io::Error::other(e)))?;
    replace_file(path, &bytes)
}

/// Replace `path` with `contents` via a temporary sibling file and a rename.
///
/// Readers see either the old content or the new content, never a partial write.
/// The original file's permissions are carried over when it exists. A symlink is
/// followed and its target is replaced, so the link itself stays in place.
pub fn replace_file(path: &Utf8Path, contents: &[u8]) -> Result<(), SanitizeError> {
    let target = match std::fs::canonicalize(path) {
        Ok(resolved) => resolved,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => path.as_std_path().to_path_buf(),
        Err(err) => return Err(io_error("resolve", path, err)),
    };
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".modsan-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| io_error("create temporary file for", path, e))?;
    tmp.write_all(contents)
        .map_err(|e| io_error("write", path, e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| io_error("flush", path, e))?;

    if let Ok(meta) = std::fs::metadata(&target)
        && let Err(err) = tmp.as_file().set_permissions(meta.permissions())
    {
        warn!(%path, error = %err, "could not carry over file permissions");
    }

    tmp.persist(&target)
        .map_err(|e| io_error("replace", path, e.error))?;
    debug!(%path, bytes = contents.len(), "replaced file");
    Ok(())
}
