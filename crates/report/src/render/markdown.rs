//! Narrative (Markdown) representation

use crate::render::{humanize_key, Footer};
use crate::types::FailureReport;

pub fn render(report: &FailureReport, footer: Footer<'_>) -> String {
    let mut md = String::new();

    md.push_str(&format!("# Bug Report: {}\n\n", report.test_name));
    md.push_str(&format!("**Report ID:** {}  \n", report.report_id));
    md.push_str(&format!("**Date:** {}  \n", report.timestamp));
    md.push_str(&format!("**Status:** {}\n\n", report.status));
    md.push_str("---\n\n");

    md.push_str("## Test Information\n\n");
    md.push_str(&format!("**Test Name:** `{}`\n\n", report.test_name));
    md.push_str("**Failure Message:**\n```\n");
    md.push_str(&report.failure_message);
    md.push_str("\n```\n\n---\n\n");

    md.push_str("## Test Steps\n\n");
    if report.test_steps.is_empty() {
        md.push_str("No steps provided.\n");
    } else {
        for (i, step) in report.test_steps.iter().enumerate() {
            md.push_str(&format!("{}. {}\n", i + 1, step));
        }
    }
    md.push_str("\n---\n\n");

    md.push_str("## Expected vs Actual Results\n\n");
    md.push_str(&format!("**Expected Result:**\n{}\n\n", report.expected_result));
    md.push_str(&format!("**Actual Result:**\n{}\n\n", report.actual_result));
    md.push_str("---\n\n");

    md.push_str("## Screenshot\n\n");
    match &report.screenshot {
        Some(path) => {
            md.push_str(&format!("![Screenshot]({})\n\n", path));
            md.push_str(&format!("**Screenshot Path:** `{}`\n\n", path));
        }
        None => md.push_str("No screenshot available.\n\n"),
    }
    md.push_str("---\n\n");

    md.push_str("## Environment Information\n\n");
    for (key, value) in &report.environment {
        md.push_str(&format!("- **{}:** {}\n", humanize_key(key), value));
    }

    if !report.additional_info.is_empty() {
        md.push_str("\n---\n\n## Additional Information\n\n");
        for (key, value) in &report.additional_info {
            md.push_str(&format!("- **{}:** {}\n", key, value));
        }
    }

    md.push_str("\n---\n\n");
    md.push_str("## Reproduction Steps\n\n");
    md.push_str("1. Navigate to the application\n");
    md.push_str("2. Follow the test steps mentioned above\n");
    md.push_str("3. Observe the failure\n\n");
    md.push_str("---\n\n");

    md.push_str(&format!("**Generated by:** {}  \n", footer.framework_name));
    md.push_str(&format!("**Report Location:** `{}`\n", footer.location.display()));

    md
}
