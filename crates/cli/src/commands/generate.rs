//! Generate Command

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use stylezone_report::{FailureEvent, ReportFormat, ReportGenerator, ReportValue};

use crate::output::{print_info, print_item, print_success, OutputFormat, TableDisplay};

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Load the failure event from a YAML or JSON file
    #[arg(long, conflicts_with_all = ["test_name", "message"])]
    event: Option<PathBuf>,

    /// Name of the failed test
    #[arg(short, long, required_unless_present = "event")]
    test_name: Option<String>,

    /// Failure message from the test
    #[arg(short, long, required_unless_present = "event")]
    message: Option<String>,

    /// Screenshot captured at failure time
    #[arg(long)]
    screenshot: Option<PathBuf>,

    /// Test step, repeat in execution order
    #[arg(long = "step")]
    steps: Vec<String>,

    /// Expected result
    #[arg(long)]
    expected: Option<String>,

    /// Actual result
    #[arg(long)]
    actual: Option<String>,

    /// Environment entry, KEY=VALUE (repeatable)
    #[arg(long = "env", value_parser = parse_key_val)]
    environment: Vec<(String, String)>,

    /// Additional info entry, KEY=VALUE (repeatable)
    #[arg(long = "info", value_parser = parse_key_val)]
    info: Vec<(String, String)>,
}

/// Generated report display wrapper for serialization
#[derive(Serialize)]
pub struct GeneratedDisplay {
    pub report_id: String,
    pub test_name: String,
    pub json: String,
    pub markdown: String,
    pub html: String,
}

impl TableDisplay for GeneratedDisplay {
    fn headers() -> Vec<&'static str> {
        vec!["Report ID", "Test", "JSON Report", "Markdown Report", "HTML Report"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.report_id.clone(),
            self.test_name.clone(),
            self.json.clone(),
            self.markdown.clone(),
            self.html.clone(),
        ]
    }
}

fn parse_key_val(s: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
    if key.trim().is_empty() {
        return Err(format!("empty key in '{}'", s));
    }
    Ok((key.trim().to_string(), value.to_string()))
}

impl GenerateArgs {
    fn into_event(self) -> Result<FailureEvent> {
        let mut event = match &self.event {
            Some(path) => FailureEvent::from_file(path)
                .with_context(|| format!("Failed to load event from {}", path.display()))?,
            None => FailureEvent::new(
                self.test_name.unwrap_or_default(),
                self.message.unwrap_or_default(),
            ),
        };

        if let Some(path) = self.screenshot {
            event.screenshot_path = Some(path);
        }
        if !self.steps.is_empty() {
            event.test_steps = Some(self.steps);
        }
        if self.expected.is_some() {
            event.expected_result = self.expected;
        }
        if self.actual.is_some() {
            event.actual_result = self.actual;
        }
        for (key, value) in self.environment {
            event = event.with_env(key, value);
        }
        if !self.info.is_empty() {
            let info = event.additional_info.get_or_insert_with(BTreeMap::new);
            for (key, value) in self.info {
                info.insert(key, ReportValue::from(value));
            }
        }

        Ok(event)
    }
}

pub fn execute(args: GenerateArgs, generator: &ReportGenerator, format: OutputFormat) -> Result<()> {
    let event = args.into_event()?;
    let (id, report) = generator.generate_report(event)?;

    let path = |f: ReportFormat| generator.report_path(&id, f).display().to_string();
    let display = GeneratedDisplay {
        report_id: id.to_string(),
        test_name: report.test_name,
        json: path(ReportFormat::Json),
        markdown: path(ReportFormat::Markdown),
        html: path(ReportFormat::Html),
    };

    if matches!(format, OutputFormat::Table) {
        print_success(&format!("Bug report {} generated", id));
        if report.screenshot.is_none() {
            print_info("No screenshot attached");
        }
    }
    print_item(&display, format);

    Ok(())
}
