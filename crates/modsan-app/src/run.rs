//! The `run` use case: sanitize every module metadata file of a Gradle build.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use modsan_domain::Removal;
use modsan_settings::{ModuleSource, Overrides, ResolvedConfig};
use modsan_types::{
    FileOutcome, FileReport, RemovedEntry, ReportData, RepoPath, RunMode, SCHEMA_REPORT_V1,
    SanitizeError, SanitizeReport, ToolMeta, Verdict,
};
use rayon::prelude::*;
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::sanitize::{SanitizeOptions, SanitizeSummary, sanitize_path};

/// Input for the run use case.
#[derive(Clone, Debug)]
pub struct RunInput<'a> {
    /// Repository root path.
    pub repo_root: &'a Utf8Path,
    /// `modsan.toml` contents (empty string if not found).
    pub config_text: &'a str,
    /// Root `publish.json` contents, if the file exists.
    pub publish_json_text: Option<&'a str>,
    /// CLI overrides.
    pub overrides: Overrides,
    pub mode: RunMode,
}

/// Output from the run use case.
#[derive(Clone, Debug)]
pub struct RunOutput {
    pub report: SanitizeReport,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
}

/// Resolve config, collect target files, sanitize them in parallel, and build a report.
///
/// Per-file failures are recorded in the report; only setup failures are returned as errors.
pub fn run_sanitize(input: RunInput<'_>) -> anyhow::Result<RunOutput> {
    let started_at = OffsetDateTime::now_utc();

    let cfg = if input.config_text.trim().is_empty() {
        modsan_settings::ModsanConfigV1::default()
    } else {
        modsan_settings::parse_config_toml(input.config_text).context("parse config")?
    };
    let legacy = input
        .publish_json_text
        .map(modsan_settings::parse_publish_json)
        .transpose()
        .context("parse publish.json")?;

    let resolved = modsan_settings::resolve_config(cfg, legacy, input.overrides.clone())
        .context("resolve config")?;
    let effective = &resolved.effective;

    let targets = target_files(input.repo_root, &resolved)?;
    info!(
        files = targets.len(),
        publication = %effective.publication,
        mode = ?input.mode,
        "sanitizing module metadata"
    );
    if targets.is_empty() {
        warn!(root = %input.repo_root, "no module metadata files found");
    }

    let options = SanitizeOptions {
        indent: effective.indent,
        mode: input.mode,
    };
    let files: Vec<FileReport> = targets
        .par_iter()
        .map(|path| {
            let result = sanitize_path(path, &effective.exclusions, options);
            file_report(input.repo_root, path, input.mode, result)
        })
        .collect();

    let data = summarize(&files);
    let verdict = verdict_for(input.mode, &data);

    let report = SanitizeReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: tool_meta(),
        started_at,
        finished_at: OffsetDateTime::now_utc(),
        mode: input.mode,
        verdict,
        exclusions: effective.exclusions.as_slice().to_vec(),
        files,
        data,
    };

    Ok(RunOutput {
        report,
        resolved_config: resolved,
    })
}

pub(crate) fn tool_meta() -> ToolMeta {
    ToolMeta {
        name: "modsan".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

fn target_files(root: &Utf8Path, resolved: &ResolvedConfig) -> anyhow::Result<Vec<Utf8PathBuf>> {
    let effective = &resolved.effective;
    let files = match &effective.modules {
        ModuleSource::Config(dirs) | ModuleSource::PublishJson(dirs) => dirs
            .iter()
            .map(|dir| {
                modsan_repo::module_file_path(
                    root,
                    dir,
                    &effective.build_dir,
                    &effective.publication,
                )
            })
            .collect(),
        ModuleSource::Discover => modsan_repo::discover_module_files(
            root,
            &effective.build_dir,
            &effective.publication,
        )
        .context("discover module metadata")?,
    };
    Ok(files)
}

fn file_report(
    root: &Utf8Path,
    path: &Utf8Path,
    mode: RunMode,
    result: Result<SanitizeSummary, SanitizeError>,
) -> FileReport {
    let path_rel = RepoPath::relative_to(root, path);
    match result {
        Ok(summary) => {
            let outcome = match (summary.is_changed(), mode) {
                (false, _) => FileOutcome::Unchanged,
                (true, RunMode::Write) => FileOutcome::Sanitized,
                (true, RunMode::Check) => FileOutcome::WouldChange,
            };
            info!(path = %path_rel.as_str(), ?outcome, removed = summary.removed.len(), "processed");
            FileReport {
                path: path_rel,
                outcome,
                removed: summary.removed.into_iter().map(removed_entry).collect(),
                error: None,
            }
        }
        Err(err) => {
            let message = format!("{:#}", anyhow::Error::new(err));
            warn!(path = %path_rel.as_str(), error = %message, "failed to sanitize");
            FileReport {
                path: path_rel,
                outcome: FileOutcome::Error,
                removed: Vec::new(),
                error: Some(message),
            }
        }
    }
}

fn removed_entry(removal: Removal) -> RemovedEntry {
    RemovedEntry {
        pointer: removal.pointer.to_string(),
        coordinate: removal.coordinate,
        variant: removal.variant,
        entry: removal.entry.into(),
    }
}

fn summarize(files: &[FileReport]) -> ReportData {
    let mut data = ReportData {
        files_total: files.len() as u32,
        ..Default::default()
    };
    for file in files {
        match file.outcome {
            FileOutcome::Sanitized | FileOutcome::WouldChange => data.files_changed += 1,
            FileOutcome::Error => data.errors += 1,
            FileOutcome::Unchanged => {}
        }
        data.dependencies_removed += file.removed.len() as u32;
    }
    data
}

fn verdict_for(mode: RunMode, data: &ReportData) -> Verdict {
    if data.errors > 0 {
        Verdict::Fail
    } else if mode == RunMode::Check && data.files_changed > 0 {
        Verdict::Changed
    } else {
        Verdict::Pass
    }
}
