//! Structured (JSON) representation

use crate::error::ReportResult;
use crate::types::FailureReport;

/// Pretty-printed JSON with two-space indentation
pub fn render(report: &FailureReport) -> ReportResult<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Read back a report written by [`render`]
pub fn parse(content: &str) -> ReportResult<FailureReport> {
    Ok(serde_json::from_str(content)?)
}
