//! Generator configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ReportError, ReportResult};

/// Live StyleZone site used when no base URL is configured
pub const DEFAULT_BASE_URL: &str = "https://muntasir101.github.io/stylezone";

/// Configuration for the report generator.
///
/// Everything the generator would otherwise read from the ambient
/// environment at report time (base URL, browser) is captured here once, so
/// generation only depends on its explicit inputs plus this value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Directory receiving the `.json`/`.md`/`.html` report files
    pub report_dir: PathBuf,

    /// Application under test, recorded in the default environment
    pub base_url: String,

    /// Browser name recorded in the default environment
    pub browser: String,

    /// Name shown in report footers
    pub framework_name: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            report_dir: PathBuf::from("bug_reports"),
            base_url: DEFAULT_BASE_URL.to_string(),
            browser: "Chrome".to_string(),
            framework_name: "StyleZone Test Automation Framework".to_string(),
        }
    }
}

impl ReportConfig {
    /// Default configuration with overrides from `BASE_URL`,
    /// `BUG_REPORT_DIR` and `BROWSER`
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Load a TOML config file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> ReportResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
            .map_err(|e| ReportError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_toml(content: &str) -> ReportResult<Self> {
        toml::from_str(content).map_err(|e| ReportError::Config(e.to_string()))
    }

    /// Apply environment variable overrides on top of this config
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply `BASE_URL`, `BUG_REPORT_DIR` and `BROWSER` overrides looked up
    /// through `lookup`. Blank values are ignored.
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = var("BASE_URL") {
            self.base_url = url;
        }
        if let Some(dir) = var("BUG_REPORT_DIR") {
            self.report_dir = PathBuf::from(dir);
        }
        if let Some(browser) = var("BROWSER") {
            self.browser = browser;
        }
        self
    }

    pub fn with_report_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.report_dir = dir.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}
