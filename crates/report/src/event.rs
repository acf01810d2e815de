//! Failure events handed to the generator by a test harness

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::ReportResult;
use crate::types::ReportValue;

/// Everything a failing test knows about its failure.
///
/// Only `test_name` and `failure_message` are required; the generator fills
/// in defaults for the rest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FailureEvent {
    /// Name of the failed test
    pub test_name: String,

    /// Error message or stack excerpt from the test
    pub failure_message: String,

    /// Screenshot captured by the harness, if any
    #[serde(default)]
    pub screenshot_path: Option<PathBuf>,

    /// Human-readable steps, in execution order
    #[serde(default)]
    pub test_steps: Option<Vec<String>>,

    #[serde(default)]
    pub expected_result: Option<String>,

    #[serde(default)]
    pub actual_result: Option<String>,

    /// Environment snapshot (platform, browser, URLs, ...)
    #[serde(default)]
    pub environment: Option<BTreeMap<String, String>>,

    /// Extra diagnostics (traceback, test file, ...)
    #[serde(default)]
    pub additional_info: Option<BTreeMap<String, ReportValue>>,
}

impl FailureEvent {
    pub fn new(test_name: impl Into<String>, failure_message: impl Into<String>) -> Self {
        Self {
            test_name: test_name.into(),
            failure_message: failure_message.into(),
            ..Default::default()
        }
    }

    pub fn with_screenshot(mut self, path: impl Into<PathBuf>) -> Self {
        self.screenshot_path = Some(path.into());
        self
    }

    pub fn with_steps<I, S>(mut self, steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.test_steps = Some(steps.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected_result = Some(expected.into());
        self
    }

    pub fn with_actual(mut self, actual: impl Into<String>) -> Self {
        self.actual_result = Some(actual.into());
        self
    }

    /// Add one environment entry, keeping any already present
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.environment
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Add one diagnostic entry, keeping any already present
    pub fn with_info(mut self, key: impl Into<String>, value: impl Into<ReportValue>) -> Self {
        self.additional_info
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Pull numbered steps and the expected result out of a test's doc text.
    ///
    /// Lines starting with `1.` through `9.` become steps. The text after the
    /// last `Expected:` marker, up to the end of that line, becomes the
    /// expected result. Fields are left alone when nothing is found.
    pub fn with_docstring(mut self, doc: &str) -> Self {
        let steps = docstring_steps(doc);
        if !steps.is_empty() {
            self.test_steps = Some(steps);
        }
        if let Some(expected) = docstring_expected(doc) {
            self.expected_result = Some(expected);
        }
        self
    }

    pub fn from_yaml(yaml: &str) -> ReportResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_json(json: &str) -> ReportResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load an event file; `.json` is parsed as JSON, anything else as YAML
    pub fn from_file(path: &Path) -> ReportResult<Self> {
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&content),
            _ => Self::from_yaml(&content),
        }
    }
}

fn docstring_steps(doc: &str) -> Vec<String> {
    doc.lines()
        .map(str::trim)
        .filter(|line| {
            let mut chars = line.chars();
            matches!(
                (chars.next(), chars.next()),
                (Some('1'..='9'), Some('.'))
            )
        })
        .map(str::to_string)
        .collect()
}

fn docstring_expected(doc: &str) -> Option<String> {
    let (_, tail) = doc.rsplit_once("Expected:")?;
    let line = tail.trim().lines().next().unwrap_or_default().trim();
    Some(line.to_string())
}
