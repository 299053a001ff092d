use camino::Utf8Path;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Repo-relative path used in reports.
///
/// Always forward slashes, never a leading `./`, never empty (`.` stands for the root).
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct RepoPath(String);

impl Default for RepoPath {
    fn default() -> Self {
        RepoPath::new(".")
    }
}

impl RepoPath {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        let mut v = s.as_ref().replace('\\', "/");
        while let Some(rest) = v.strip_prefix("./") {
            v = rest.to_string();
        }
        if v.is_empty() {
            v = ".".to_string();
        }
        Self(v)
    }

    /// Express `path` relative to `root` when it lives underneath it.
    pub fn relative_to(root: &Utf8Path, path: &Utf8Path) -> Self {
        RepoPath::new(path.strip_prefix(root).unwrap_or(path).as_str())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
