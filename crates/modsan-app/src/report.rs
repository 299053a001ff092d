use anyhow::Context;
use modsan_types::{ReportData, RunMode, SCHEMA_REPORT_V1, SanitizeReport, Verdict};
use time::OffsetDateTime;

use crate::run::tool_meta;

pub fn parse_report_json(text: &str) -> anyhow::Result<SanitizeReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    if schema != SCHEMA_REPORT_V1 {
        anyhow::bail!("unknown report schema: {schema:?} (expected {SCHEMA_REPORT_V1})");
    }

    serde_json::from_value(value).context("parse modsan report")
}

pub fn serialize_report(report: &SanitizeReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

/// A failing report for errors raised before any file was processed.
pub fn runtime_error_report(mode: RunMode, message: &str) -> SanitizeReport {
    let now = OffsetDateTime::now_utc();
    SanitizeReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: tool_meta(),
        started_at: now,
        finished_at: now,
        mode,
        verdict: Verdict::Fail,
        exclusions: Vec::new(),
        files: Vec::new(),
        data: ReportData {
            runtime_error: Some(message.to_string()),
            ..Default::default()
        },
    }
}

/// Map verdict to exit code: 0 = pass, 1 = fail, 2 = check mode found changes.
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Pass => 0,
        Verdict::Fail => 1,
        Verdict::Changed => 2,
    }
}

pub fn report_exit_code(report: &SanitizeReport) -> i32 {
    verdict_exit_code(report.verdict)
}
