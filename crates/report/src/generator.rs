//! Report generator: turns failure events into persisted reports

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::ReportConfig;
use crate::environment::default_environment;
use crate::error::{ReportError, ReportResult};
use crate::event::FailureEvent;
use crate::render::{self, Footer, ReportFormat};
use crate::types::{FailureReport, ReportId, ReportStatus, NOT_AVAILABLE, REPORT_ID_PREFIX};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Short listing entry for a persisted report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub report_id: ReportId,
    pub test_name: String,
    pub timestamp: String,
    pub path: PathBuf,
}

/// Generates bug reports for failed tests.
///
/// Holds only configuration; every call is independent. Reports are written
/// as `<report_dir>/<id>.json`, `.md` and `.html`.
#[derive(Debug, Clone)]
pub struct ReportGenerator {
    config: ReportConfig,
}

impl ReportGenerator {
    /// Create a generator, creating the report directory if needed
    pub fn new(config: ReportConfig) -> ReportResult<Self> {
        std::fs::create_dir_all(&config.report_dir)?;
        Ok(Self { config })
    }

    /// Create a generator without touching the filesystem. For read-only
    /// use; a missing directory simply holds no reports.
    pub fn open(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Default configuration writing to `dir`
    pub fn with_dir(dir: impl Into<PathBuf>) -> ReportResult<Self> {
        Self::new(ReportConfig::default().with_report_dir(dir))
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub fn report_dir(&self) -> &Path {
        &self.config.report_dir
    }

    /// Path of one representation of a report
    pub fn report_path(&self, id: &ReportId, format: ReportFormat) -> PathBuf {
        format.path_in(&self.config.report_dir, id)
    }

    /// Generate and persist a report stamped with the current time
    pub fn generate_report(&self, event: FailureEvent) -> ReportResult<(ReportId, FailureReport)> {
        self.generate_report_at(event, Local::now())
    }

    /// Generate and persist a report stamped with `now`.
    ///
    /// Files are written JSON, Markdown, HTML in that order. A failed write
    /// is returned as-is; files written before it stay on disk.
    pub fn generate_report_at(
        &self,
        event: FailureEvent,
        now: DateTime<Local>,
    ) -> ReportResult<(ReportId, FailureReport)> {
        let report = self.build_report(event, now)?;
        let id = report.report_id.clone();

        std::fs::create_dir_all(&self.config.report_dir)?;

        let json_path = self.report_path(&id, ReportFormat::Json);
        if json_path.exists() {
            warn!("Report {} already exists and will be overwritten", id);
        }

        for format in ReportFormat::ALL {
            let path = self.report_path(&id, format);
            let content = self.render(&report, format, &path)?;
            std::fs::write(&path, content)?;
            debug!("Wrote {}", path.display());
        }

        info!("Generated bug report {} for {}", id, report.test_name);
        Ok((id, report))
    }

    /// Normalize an event into an immutable report record
    fn build_report(&self, event: FailureEvent, now: DateTime<Local>) -> ReportResult<FailureReport> {
        if event.test_name.trim().is_empty() {
            return Err(ReportError::InvalidInput("test_name must not be empty".to_string()));
        }
        if event.failure_message.trim().is_empty() {
            return Err(ReportError::InvalidInput(
                "failure_message must not be empty".to_string(),
            ));
        }

        let screenshot = event.screenshot_path.and_then(|path| {
            if path.exists() {
                Some(path.display().to_string())
            } else {
                debug!("Screenshot {} not found, omitting", path.display());
                None
            }
        });

        let environment = event
            .environment
            .filter(|env| !env.is_empty())
            .unwrap_or_else(|| default_environment(&self.config));

        Ok(FailureReport {
            report_id: ReportId::from_time(&now),
            timestamp: now.format(TIMESTAMP_FORMAT).to_string(),
            test_name: event.test_name,
            status: ReportStatus::Failed,
            failure_message: event.failure_message,
            screenshot,
            test_steps: event.test_steps.unwrap_or_default(),
            expected_result: non_empty_or_na(event.expected_result),
            actual_result: non_empty_or_na(event.actual_result),
            environment,
            additional_info: event.additional_info.unwrap_or_default(),
        })
    }

    fn render(&self, report: &FailureReport, format: ReportFormat, path: &Path) -> ReportResult<String> {
        let footer = Footer {
            framework_name: &self.config.framework_name,
            location: path,
        };

        match format {
            ReportFormat::Json => render::json::render(report),
            ReportFormat::Markdown => Ok(render::markdown::render(report, footer)),
            ReportFormat::Html => Ok(render::html::render(report, footer)),
        }
    }

    /// Most recently created report, judged by filesystem metadata.
    ///
    /// Uses creation time where the platform records it and modification
    /// time otherwise. Copying or touching files changes the answer; see
    /// [`Self::get_latest_report_by_timestamp`] for the content-based lookup.
    pub fn get_latest_report(&self) -> ReportResult<Option<FailureReport>> {
        let mut latest: Option<(SystemTime, PathBuf)> = None;

        for path in self.report_files()? {
            let metadata = std::fs::metadata(&path)?;
            let created = metadata.created().or_else(|_| metadata.modified())?;

            // Ties go to the lexically larger file name, i.e. the later id
            let newer = match &latest {
                Some((time, best)) => (created, &path) > (*time, best),
                None => true,
            };
            if newer {
                latest = Some((created, path));
            }
        }

        match latest {
            Some((_, path)) => Ok(Some(load_file(&path)?)),
            None => Ok(None),
        }
    }

    /// Most recent report judged by the `timestamp` recorded inside each
    /// file. Files that cannot be parsed are skipped.
    pub fn get_latest_report_by_timestamp(&self) -> ReportResult<Option<FailureReport>> {
        let mut latest: Option<(NaiveDateTime, FailureReport)> = None;

        for path in self.report_files()? {
            let report = match load_file(&path) {
                Ok(report) => report,
                Err(e) => {
                    warn!("Skipping unreadable report {}: {}", path.display(), e);
                    continue;
                }
            };
            let stamp = match NaiveDateTime::parse_from_str(&report.timestamp, TIMESTAMP_FORMAT) {
                Ok(stamp) => stamp,
                Err(e) => {
                    warn!("Skipping report {} with bad timestamp: {}", path.display(), e);
                    continue;
                }
            };

            if latest.as_ref().map_or(true, |(best, _)| stamp > *best) {
                latest = Some((stamp, report));
            }
        }

        Ok(latest.map(|(_, report)| report))
    }

    /// All reports in the directory, sorted by id
    pub fn list_reports(&self) -> ReportResult<Vec<ReportSummary>> {
        let mut summaries = Vec::new();

        for path in self.report_files()? {
            match load_file(&path) {
                Ok(report) => summaries.push(ReportSummary {
                    report_id: report.report_id,
                    test_name: report.test_name,
                    timestamp: report.timestamp,
                    path,
                }),
                Err(e) => warn!("Skipping unreadable report {}: {}", path.display(), e),
            }
        }

        summaries.sort_by(|a, b| a.report_id.cmp(&b.report_id));
        Ok(summaries)
    }

    /// Load a single report by id
    pub fn load_report(&self, id: &str) -> ReportResult<FailureReport> {
        let id = ReportId::parse(id)
            .ok_or_else(|| ReportError::InvalidInput(format!("Malformed report id: {}", id)))?;
        let path = self.report_path(&id, ReportFormat::Json);

        if !path.exists() {
            return Err(ReportError::NotFound(id.to_string()));
        }
        load_file(&path)
    }

    /// `BUG_*.json` files in the report directory
    fn report_files(&self) -> ReportResult<Vec<PathBuf>> {
        let dir = &self.config.report_dir;
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            let is_report = path.is_file()
                && path.extension().map(|e| e == "json").unwrap_or(false)
                && path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .map(|n| n.starts_with(REPORT_ID_PREFIX))
                    .unwrap_or(false);

            if is_report {
                files.push(path);
            }
        }

        Ok(files)
    }
}

fn load_file(path: &Path) -> ReportResult<FailureReport> {
    let content = std::fs::read_to_string(path)?;
    render::json::parse(&content)
}

fn non_empty_or_na(value: Option<String>) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 10, 15, h, m, s).unwrap()
    }

    #[test]
    fn test_rejects_empty_required_fields() {
        let dir = TempDir::new().unwrap();
        let generator = ReportGenerator::with_dir(dir.path()).unwrap();

        let err = generator.generate_report(FailureEvent::new("  ", "boom")).unwrap_err();
        assert!(matches!(err, ReportError::InvalidInput(_)));

        let err = generator.generate_report(FailureEvent::new("test_x", "")).unwrap_err();
        assert!(matches!(err, ReportError::InvalidInput(_)));

        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_id_and_timestamp_share_instant() {
        let dir = TempDir::new().unwrap();
        let generator = ReportGenerator::with_dir(dir.path()).unwrap();

        let (id, report) = generator
            .generate_report_at(FailureEvent::new("test_a", "boom"), at(8, 30, 5))
            .unwrap();

        assert_eq!(id.as_str(), "BUG_20261015_083005");
        assert_eq!(report.timestamp, "2026-10-15T08:30:05.000000");
    }

    #[test]
    fn test_empty_environment_falls_back_to_default() {
        let dir = TempDir::new().unwrap();
        let generator = ReportGenerator::new(
            ReportConfig::default()
                .with_report_dir(dir.path())
                .with_base_url("http://localhost:8000"),
        )
        .unwrap();

        let mut event = FailureEvent::new("test_a", "boom");
        event.environment = Some(BTreeMap::new());
        let (_, report) = generator.generate_report_at(event, at(9, 0, 0)).unwrap();

        assert_eq!(report.environment["base_url"], "http://localhost:8000");
    }

    #[test]
    fn test_supplied_environment_is_kept() {
        let dir = TempDir::new().unwrap();
        let generator = ReportGenerator::with_dir(dir.path()).unwrap();

        let event = FailureEvent::new("test_a", "boom").with_env("current_url", "https://x.test/shop.html");
        let (_, report) = generator.generate_report_at(event, at(9, 0, 0)).unwrap();

        assert_eq!(report.environment.len(), 1);
        assert_eq!(report.environment["current_url"], "https://x.test/shop.html");
    }

    #[test]
    fn test_load_report_by_id() {
        let dir = TempDir::new().unwrap();
        let generator = ReportGenerator::with_dir(dir.path()).unwrap();
        let (id, report) = generator
            .generate_report_at(FailureEvent::new("test_a", "boom"), at(9, 0, 0))
            .unwrap();

        assert_eq!(generator.load_report(id.as_str()).unwrap(), report);
        assert!(matches!(
            generator.load_report("BUG_20000101_000000"),
            Err(ReportError::NotFound(_))
        ));
        assert!(matches!(
            generator.load_report("../etc/passwd"),
            Err(ReportError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_latest_on_missing_directory_is_none() {
        let dir = TempDir::new().unwrap();
        let generator = ReportGenerator::with_dir(dir.path().join("reports")).unwrap();
        std::fs::remove_dir(dir.path().join("reports")).unwrap();

        assert!(generator.get_latest_report().unwrap().is_none());
        assert!(generator.list_reports().unwrap().is_empty());
    }

    #[test]
    fn test_open_does_not_create_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("typo_reports");
        let generator = ReportGenerator::open(ReportConfig::default().with_report_dir(&missing));

        assert!(generator.list_reports().unwrap().is_empty());
        assert!(generator.get_latest_report().unwrap().is_none());
        assert!(!missing.exists());
    }

    #[test]
    fn test_collision_overwrites_previous_trio() {
        let dir = TempDir::new().unwrap();
        let generator = ReportGenerator::with_dir(dir.path()).unwrap();

        generator
            .generate_report_at(FailureEvent::new("test_first", "boom"), at(9, 0, 0))
            .unwrap();
        let (id, _) = generator
            .generate_report_at(FailureEvent::new("test_second", "boom"), at(9, 0, 0))
            .unwrap();

        assert_eq!(generator.list_reports().unwrap().len(), 1);
        assert_eq!(generator.load_report(id.as_str()).unwrap().test_name, "test_second");
    }
}
