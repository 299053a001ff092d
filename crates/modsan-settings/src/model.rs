use modsan_types::Coordinate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `modsan.toml` schema v1.
///
/// This is a *user-facing* config model: it is intentionally permissive so forward-compat is easy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ModsanConfigV1 {
    /// Optional schema string for tooling (`modsan.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Gradle publication whose `module.json` is sanitized (default `apiInterface`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication: Option<String>,

    /// Gradle build directory name inside each project (default `build`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_dir: Option<String>,

    /// Spaces per indentation level in rewritten documents (default 4).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indent: Option<usize>,

    /// Dependency coordinates to strip. Defaults to the internal aggregator.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<Coordinate>,

    /// Gradle projects to process. Takes precedence over `publish.json`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modules: Vec<ModuleConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ModuleConfig {
    /// Gradle project path, e.g. `:order-api` or `:services:billing`.
    pub name: String,
}
