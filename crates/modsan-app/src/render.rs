use modsan_types::{FileOutcome, RunMode, SanitizeReport, Verdict};

pub fn render_markdown(report: &SanitizeReport) -> String {
    let mut out = String::new();

    out.push_str("# Modsan report\n\n");
    let verdict = match report.verdict {
        Verdict::Pass => "PASS",
        Verdict::Changed => "CHANGED",
        Verdict::Fail => "FAIL",
    };
    let mode = match report.mode {
        RunMode::Write => "write",
        RunMode::Check => "check",
    };
    out.push_str(&format!(
        "- Verdict: **{}** ({} mode)\n- Files: {} changed / {} total, {} errors\n- Dependencies removed: {}\n",
        verdict,
        mode,
        report.data.files_changed,
        report.data.files_total,
        report.data.errors,
        report.data.dependencies_removed
    ));
    if !report.exclusions.is_empty() {
        let rules: Vec<String> = report
            .exclusions
            .iter()
            .map(|c| format!("`{c}`"))
            .collect();
        out.push_str(&format!("- Excluding: {}\n", rules.join(", ")));
    }
    out.push('\n');

    if let Some(err) = &report.data.runtime_error {
        out.push_str(&format!("> Error: {}\n", err));
        return out;
    }

    if report.files.is_empty() {
        out.push_str("No module metadata files.\n");
        return out;
    }

    out.push_str("## Files\n\n");

    for file in &report.files {
        let outcome = match file.outcome {
            FileOutcome::Sanitized => "SANITIZED",
            FileOutcome::Unchanged => "UNCHANGED",
            FileOutcome::WouldChange => "WOULD CHANGE",
            FileOutcome::Error => "ERROR",
        };
        out.push_str(&format!("- [{}] `{}`\n", outcome, file.path.as_str()));

        for removed in &file.removed {
            match &removed.variant {
                Some(variant) => out.push_str(&format!(
                    "  - removed `{}` from `{}` (`{}`)\n",
                    removed.coordinate, variant, removed.pointer
                )),
                None => out.push_str(&format!(
                    "  - removed `{}` (`{}`)\n",
                    removed.coordinate, removed.pointer
                )),
            }
        }
        if let Some(err) = &file.error {
            out.push_str(&format!("  - error: {}\n", err));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime_error_report;
    use modsan_types::{
        Coordinate, FileReport, RemovedEntry, ReportData, RepoPath, SCHEMA_REPORT_V1, ToolMeta,
    };
    use time::OffsetDateTime;

    fn sample_report() -> SanitizeReport {
        let now = OffsetDateTime::UNIX_EPOCH;
        SanitizeReport {
            schema: SCHEMA_REPORT_V1.to_string(),
            tool: ToolMeta {
                name: "modsan".to_string(),
                version: "0.0.0".to_string(),
            },
            started_at: now,
            finished_at: now,
            mode: RunMode::Check,
            verdict: Verdict::Fail,
            exclusions: vec![Coordinate::aggregator()],
            files: vec![
                FileReport {
                    path: RepoPath::new("api/build/publications/apiInterface/module.json"),
                    outcome: FileOutcome::WouldChange,
                    removed: vec![
                        RemovedEntry {
                            pointer: "/variants/0/dependencies/0".to_string(),
                            coordinate: Coordinate::aggregator(),
                            variant: Some("apiElements".to_string()),
                            entry: serde_json::Value::Null,
                        },
                        RemovedEntry {
                            pointer: "/variants/1/dependencies/0".to_string(),
                            coordinate: Coordinate::aggregator(),
                            variant: None,
                            entry: serde_json::Value::Null,
                        },
                    ],
                    error: None,
                },
                FileReport {
                    path: RepoPath::new("client/build/publications/apiInterface/module.json"),
                    outcome: FileOutcome::Error,
                    removed: Vec::new(),
                    error: Some("malformed document client/module.json".to_string()),
                },
            ],
            data: ReportData {
                files_total: 2,
                files_changed: 1,
                dependencies_removed: 2,
                errors: 1,
                runtime_error: None,
            },
        }
    }

    #[test]
    fn render_markdown_lists_files_and_removals() {
        let md = render_markdown(&sample_report());
        assert!(md.starts_with("# Modsan report\n"));
        assert!(md.contains("Verdict: **FAIL** (check mode)"));
        assert!(md.contains("- Files: 1 changed / 2 total, 1 errors"));
        assert!(md.contains("- Excluding: `com.wonder:wonder-dependencies`"));
        assert!(md.contains("## Files"));
        assert!(md.contains("- [WOULD CHANGE] `api/build/publications/apiInterface/module.json`"));
        assert!(md.contains(
            "  - removed `com.wonder:wonder-dependencies` from `apiElements` (`/variants/0/dependencies/0`)"
        ));
        assert!(md.contains("  - removed `com.wonder:wonder-dependencies` (`/variants/1/dependencies/0`)"));
        assert!(md.contains("- [ERROR] `client/build/publications/apiInterface/module.json`"));
        assert!(md.contains("  - error: malformed document"));
    }

    #[test]
    fn render_markdown_empty_run() {
        let mut report = sample_report();
        report.verdict = Verdict::Pass;
        report.files.clear();
        report.data = ReportData::default();
        let md = render_markdown(&report);
        assert!(md.contains("Verdict: **PASS**"));
        assert!(md.contains("No module metadata files."));
    }

    #[test]
    fn render_markdown_runtime_error() {
        let report = runtime_error_report(RunMode::Write, "parse config: bad toml");
        let md = render_markdown(&report);
        assert!(md.contains("Verdict: **FAIL** (write mode)"));
        assert!(md.contains("> Error: parse config: bad toml"));
        assert!(!md.contains("## Files"));
    }
}
