//! Test-failure hook
//!
//! Glue between a test harness and the generator. Reporting is best effort:
//! a failure to write a bug report is logged and never replaces the test
//! failure that triggered it.

use std::fmt::Display;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::event::FailureEvent;
use crate::generator::ReportGenerator;
use crate::render::ReportFormat;
use crate::types::{FailureReport, ReportId};

/// Actual result recorded when a guarded test body returns an error
pub const GUARD_ACTUAL_RESULT: &str = "Test failed - see failure message";

/// A report produced by the hook, with the files it was written to
#[derive(Debug, Clone)]
pub struct GeneratedReport {
    pub report_id: ReportId,
    pub report: FailureReport,
    pub json_path: PathBuf,
    pub markdown_path: PathBuf,
    pub html_path: PathBuf,
}

pub struct FailureHook {
    generator: ReportGenerator,
}

impl FailureHook {
    pub fn new(generator: ReportGenerator) -> Self {
        Self { generator }
    }

    pub fn generator(&self) -> &ReportGenerator {
        &self.generator
    }

    /// Report a failure. Returns `None` if the report could not be written.
    pub fn on_failure(&self, event: FailureEvent) -> Option<GeneratedReport> {
        let test_name = event.test_name.clone();

        match self.generator.generate_report(event) {
            Ok((report_id, report)) => {
                let generated = GeneratedReport {
                    json_path: self.generator.report_path(&report_id, ReportFormat::Json),
                    markdown_path: self.generator.report_path(&report_id, ReportFormat::Markdown),
                    html_path: self.generator.report_path(&report_id, ReportFormat::Html),
                    report_id,
                    report,
                };

                info!("{}", "=".repeat(60));
                info!("BUG REPORT GENERATED");
                info!("Report ID: {}", generated.report_id);
                info!("Test: {}", test_name);
                info!("HTML Report: {}", generated.html_path.display());
                info!("Markdown Report: {}", generated.markdown_path.display());
                info!("JSON Report: {}", generated.json_path.display());
                info!("{}", "=".repeat(60));

                Some(generated)
            }
            Err(e) => {
                warn!("Could not generate bug report for {}: {}", test_name, e);
                None
            }
        }
    }

    /// Run a test body and report it if it fails.
    ///
    /// Steps and the expected result are taken from `doc` (numbered lines and
    /// an `Expected:` marker). The body's result is returned unchanged.
    pub fn guard<T, E, F>(&self, test_name: &str, doc: &str, test_fn: F) -> Result<T, E>
    where
        E: Display,
        F: FnOnce() -> Result<T, E>,
    {
        self.guard_event(FailureEvent::new(test_name, ""), doc, test_fn)
    }

    /// Like [`Self::guard`], reporting through `base` on failure.
    ///
    /// `base` carries what the harness knows up front (screenshot, current
    /// URL, test file). Its failure message is replaced by the error, and an
    /// actual result is filled in only if `base` has none.
    pub fn guard_event<T, E, F>(&self, base: FailureEvent, doc: &str, test_fn: F) -> Result<T, E>
    where
        E: Display,
        F: FnOnce() -> Result<T, E>,
    {
        let result = test_fn();

        if let Err(e) = &result {
            let mut event = base.with_docstring(doc);
            event.failure_message = e.to_string();
            if event.actual_result.is_none() {
                event.actual_result = Some(GUARD_ACTUAL_RESULT.to_string());
            }
            self.on_failure(event);
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_on_failure_returns_paths() {
        let dir = TempDir::new().unwrap();
        let hook = FailureHook::new(ReportGenerator::with_dir(dir.path()).unwrap());

        let generated = hook
            .on_failure(FailureEvent::new("test_sort_by_price", "prices not ascending"))
            .unwrap();

        assert!(generated.json_path.exists());
        assert!(generated.markdown_path.exists());
        assert!(generated.html_path.exists());
        assert_eq!(generated.report.report_id, generated.report_id);
    }

    #[test]
    fn test_on_failure_swallows_invalid_event() {
        let dir = TempDir::new().unwrap();
        let hook = FailureHook::new(ReportGenerator::with_dir(dir.path()).unwrap());

        assert!(hook.on_failure(FailureEvent::new("", "boom")).is_none());
    }
}
