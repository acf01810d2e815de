//! Report browsing commands: latest, list, show

use anyhow::Result;
use serde::Serialize;
use stylezone_report::{FailureReport, ReportGenerator, ReportSummary};

use crate::output::{print_item, print_list, print_none, OutputFormat, TableDisplay};

/// Full report display; serializes as the report record itself
#[derive(Serialize)]
#[serde(transparent)]
pub struct ReportDisplay<'a>(pub &'a FailureReport);

impl TableDisplay for ReportDisplay<'_> {
    fn headers() -> Vec<&'static str> {
        vec![
            "Report ID",
            "Date",
            "Test",
            "Status",
            "Failure",
            "Expected",
            "Actual",
            "Steps",
            "Screenshot",
        ]
    }

    fn row(&self) -> Vec<String> {
        let report = self.0;
        vec![
            report.report_id.to_string(),
            report.timestamp.clone(),
            report.test_name.clone(),
            report.status.to_string(),
            report.failure_message.clone(),
            report.expected_result.clone(),
            report.actual_result.clone(),
            report.test_steps.len().to_string(),
            report.screenshot.clone().unwrap_or_else(|| "-".to_string()),
        ]
    }
}

/// Report listing display wrapper for serialization
#[derive(Serialize)]
pub struct SummaryDisplay {
    pub report_id: String,
    pub test_name: String,
    pub timestamp: String,
    pub path: String,
}

impl From<ReportSummary> for SummaryDisplay {
    fn from(summary: ReportSummary) -> Self {
        Self {
            report_id: summary.report_id.to_string(),
            test_name: summary.test_name,
            timestamp: summary.timestamp,
            path: summary.path.display().to_string(),
        }
    }
}

impl TableDisplay for SummaryDisplay {
    fn headers() -> Vec<&'static str> {
        vec!["Report ID", "Test", "Date", "Path"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.report_id.clone(),
            self.test_name.clone(),
            self.timestamp.clone(),
            self.path.clone(),
        ]
    }
}

pub fn latest(generator: &ReportGenerator, by_timestamp: bool, format: OutputFormat) -> Result<()> {
    let report = if by_timestamp {
        generator.get_latest_report_by_timestamp()?
    } else {
        generator.get_latest_report()?
    };

    match report {
        Some(report) => print_item(&ReportDisplay(&report), format),
        None => print_none(
            &format!("No reports found in {}", generator.report_dir().display()),
            format,
        ),
    }
    Ok(())
}

pub fn list(generator: &ReportGenerator, format: OutputFormat) -> Result<()> {
    let items: Vec<SummaryDisplay> = generator
        .list_reports()?
        .into_iter()
        .map(SummaryDisplay::from)
        .collect();
    print_list(&items, format);
    Ok(())
}

pub fn show(generator: &ReportGenerator, id: &str, format: OutputFormat) -> Result<()> {
    let report = generator.load_report(id)?;
    print_item(&ReportDisplay(&report), format);
    Ok(())
}
