use crate::{Coordinate, RepoPath};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use time::OffsetDateTime;

/// Stable schema identifier for run reports.
pub const SCHEMA_REPORT_V1: &str = "modsan.report.v1";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Filtered documents replace the originals.
    Write,
    /// Nothing is written; outcomes describe what would change.
    Check,
}

/// Overall run result. `changed` only appears in check mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Changed,
    Fail,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FileOutcome {
    /// Written back with at least one entry removed.
    Sanitized,
    /// No matching entries.
    Unchanged,
    /// Check mode: at least one entry would be removed.
    WouldChange,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// A dependency entry dropped from a variant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RemovedEntry {
    /// JSON pointer of the entry in the input document.
    pub pointer: String,
    pub coordinate: Coordinate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    /// The entry as it appeared in the input.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub entry: JsonValue,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FileReport {
    pub path: RepoPath,
    pub outcome: FileOutcome,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub removed: Vec<RemovedEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ReportData {
    pub files_total: u32,
    pub files_changed: u32,
    pub dependencies_removed: u32,
    pub errors: u32,

    /// Set when the run failed before any file was processed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SanitizeReport {
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub mode: RunMode,
    pub verdict: Verdict,
    pub exclusions: Vec<Coordinate>,
    pub files: Vec<FileReport>,
    pub data: ReportData,
}
