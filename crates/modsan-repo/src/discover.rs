use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use globset::GlobBuilder;
use modsan_types::ids::{MODULE_METADATA_FILE, PUBLICATIONS_DIR};
use walkdir::{DirEntry, WalkDir};

/// Location of a project's generated metadata:
/// `<root>/<project_dir>/<build_dir>/publications/<publication>/module.json`.
pub fn module_file_path(
    root: &Utf8Path,
    project_dir: &str,
    build_dir: &str,
    publication: &str,
) -> Utf8PathBuf {
    let project = if project_dir == "." {
        root.to_path_buf()
    } else {
        root.join(project_dir)
    };
    project
        .join(build_dir)
        .join(PUBLICATIONS_DIR)
        .join(publication)
        .join(MODULE_METADATA_FILE)
}

/// Find every generated `module.json` for `publication` under `root`.
///
/// Hidden directories (`.git`, `.gradle`, ...) are not searched. Results are sorted.
///
/// Fails on any walk error or on a `module.json` whose path is not UTF-8.
pub fn discover_module_files(
    root: &Utf8Path,
    build_dir: &str,
    publication: &str,
) -> anyhow::Result<Vec<Utf8PathBuf>> {
    let pattern = format!(
        "**/{}/{PUBLICATIONS_DIR}/{}/{MODULE_METADATA_FILE}",
        globset::escape(build_dir),
        globset::escape(publication)
    );
    let matcher = GlobBuilder::new(&pattern)
        .literal_separator(true)
        .build()
        .with_context(|| format!("compile module file glob {pattern}"))?
        .compile_matcher();

    let mut out: Vec<Utf8PathBuf> = Vec::new();
    let walker = WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e));
    for entry in walker {
        // An unreadable directory may hide a module file; fail rather than skip it.
        let entry = entry.with_context(|| format!("walk {root}"))?;
        if !entry.file_type().is_file() || entry.file_name() != MODULE_METADATA_FILE {
            continue;
        }
        let rel = entry.path().strip_prefix(root).unwrap_or(entry.path());
        if !matcher.is_match(rel.to_string_lossy().replace('\\', "/")) {
            continue;
        }
        let abs = Utf8PathBuf::from_path_buf(entry.into_path()).map_err(|path| {
            anyhow::anyhow!("module metadata path is not valid UTF-8: {}", path.display())
        })?;
        out.push(abs);
    }

    // Stable order.
    out.sort();
    out.dedup();

    tracing::debug!(%root, found = out.len(), %pattern, "discovered module metadata");
    Ok(out)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}
