//! Report record types shared by the generator and the renderers

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

/// Prefix shared by every report id and report file name
pub const REPORT_ID_PREFIX: &str = "BUG_";

/// Placeholder for expected/actual results that were not supplied
pub const NOT_AVAILABLE: &str = "N/A";

const ID_TIME_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Time-derived report identifier, `BUG_<YYYYMMDD_HHMMSS>`.
///
/// The id is the file stem of all three persisted representations. It has
/// one-second granularity, so two reports generated within the same second
/// share an id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(String);

impl ReportId {
    /// Derive the id from a wall-clock instant
    pub fn from_time<Tz>(time: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        Self(format!("{}{}", REPORT_ID_PREFIX, time.format(ID_TIME_FORMAT)))
    }

    /// Accept a string only if it has the exact `BUG_########_######` shape
    pub fn parse(raw: &str) -> Option<Self> {
        let stamp = raw.strip_prefix(REPORT_ID_PREFIX)?;
        let (date, time) = stamp.split_once('_')?;
        let digits = |s: &str, len: usize| s.len() == len && s.bytes().all(|b| b.is_ascii_digit());

        if digits(date, 8) && digits(time, 6) {
            Some(Self(raw.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome recorded in a report. Only failures produce reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportStatus {
    #[default]
    #[serde(rename = "FAILED")]
    Failed,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Failed => "FAILED",
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Free-form diagnostic value carried in `additional_info`.
///
/// Values that are not primitives, lists or maps are turned into `Text`
/// through their string representation when they enter the record, so a
/// report always serializes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReportValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    List(Vec<ReportValue>),
    Map(BTreeMap<String, ReportValue>),
}

impl ReportValue {
    /// Coerce any displayable value (errors, paths, custom types) to text
    pub fn display(value: impl fmt::Display) -> Self {
        ReportValue::Text(value.to_string())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ReportValue::Null)
    }
}

impl fmt::Display for ReportValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportValue::Null => f.write_str("null"),
            ReportValue::Bool(b) => write!(f, "{}", b),
            ReportValue::Integer(n) => write!(f, "{}", n),
            ReportValue::Float(n) => write!(f, "{}", n),
            ReportValue::Text(s) => f.write_str(s),
            ReportValue::List(_) | ReportValue::Map(_) => {
                let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}

impl From<&str> for ReportValue {
    fn from(value: &str) -> Self {
        ReportValue::Text(value.to_string())
    }
}

impl From<String> for ReportValue {
    fn from(value: String) -> Self {
        ReportValue::Text(value)
    }
}

impl From<bool> for ReportValue {
    fn from(value: bool) -> Self {
        ReportValue::Bool(value)
    }
}

impl From<i32> for ReportValue {
    fn from(value: i32) -> Self {
        ReportValue::Integer(value.into())
    }
}

impl From<i64> for ReportValue {
    fn from(value: i64) -> Self {
        ReportValue::Integer(value)
    }
}

impl From<u32> for ReportValue {
    fn from(value: u32) -> Self {
        ReportValue::Integer(value.into())
    }
}

impl From<u64> for ReportValue {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(n) => ReportValue::Integer(n),
            Err(_) => ReportValue::Float(value as f64),
        }
    }
}

impl From<usize> for ReportValue {
    fn from(value: usize) -> Self {
        ReportValue::from(value as u64)
    }
}

impl From<f64> for ReportValue {
    fn from(value: f64) -> Self {
        ReportValue::Float(value)
    }
}

impl From<&Path> for ReportValue {
    fn from(value: &Path) -> Self {
        ReportValue::Text(value.display().to_string())
    }
}

impl From<PathBuf> for ReportValue {
    fn from(value: PathBuf) -> Self {
        ReportValue::from(value.as_path())
    }
}

impl<T: Into<ReportValue>> From<Option<T>> for ReportValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(ReportValue::Null)
    }
}

impl<T: Into<ReportValue>> From<Vec<T>> for ReportValue {
    fn from(value: Vec<T>) -> Self {
        ReportValue::List(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<ReportValue>> From<BTreeMap<String, T>> for ReportValue {
    fn from(value: BTreeMap<String, T>) -> Self {
        ReportValue::Map(value.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

/// A generated bug report. Built once by the generator and never modified
/// afterwards; the same record backs the JSON, Markdown and HTML files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureReport {
    pub report_id: ReportId,

    /// Generation time, ISO-8601 local time with microseconds
    pub timestamp: String,

    pub test_name: String,

    #[serde(default)]
    pub status: ReportStatus,

    pub failure_message: String,

    /// Screenshot path, kept only if the file existed at generation time
    #[serde(default, alias = "screenshot_path")]
    pub screenshot: Option<String>,

    #[serde(default)]
    pub test_steps: Vec<String>,

    pub expected_result: String,

    pub actual_result: String,

    #[serde(default)]
    pub environment: BTreeMap<String, String>,

    #[serde(default)]
    pub additional_info: BTreeMap<String, ReportValue>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, NaiveDate};

    #[test]
    fn test_report_id_from_time() {
        let time = NaiveDate::from_ymd_opt(2026, 10, 15)
            .unwrap()
            .and_hms_opt(9, 5, 7)
            .unwrap()
            .and_local_timezone(Local)
            .unwrap();
        let id = ReportId::from_time(&time);
        assert_eq!(id.as_str(), "BUG_20261015_090507");
        assert_eq!(ReportId::parse(id.as_str()), Some(id));
    }

    #[test]
    fn test_report_id_parse_rejects_malformed() {
        assert!(ReportId::parse("BUG_2026101_090507").is_none());
        assert!(ReportId::parse("BUG_20261015-090507").is_none());
        assert!(ReportId::parse("REPORT_20261015_090507").is_none());
        assert!(ReportId::parse("BUG_20261015_09050x").is_none());
    }

    #[test]
    fn test_status_serializes_as_failed() {
        let json = serde_json::to_string(&ReportStatus::Failed).unwrap();
        assert_eq!(json, "\"FAILED\"");
    }

    #[test]
    fn test_report_value_coercion() {
        let path = PathBuf::from("screenshots/failure.png");
        assert_eq!(
            ReportValue::from(path),
            ReportValue::Text("screenshots/failure.png".to_string())
        );
        assert_eq!(ReportValue::from(None::<String>), ReportValue::Null);
        assert_eq!(ReportValue::from(u64::MAX), ReportValue::Float(u64::MAX as f64));

        let err = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        assert_eq!(ReportValue::display(err), ReportValue::Text("disk full".to_string()));
    }

    #[test]
    fn test_report_value_untagged_roundtrip() {
        let json = r#"{"retries": 3, "flaky": false, "ratio": 0.5, "file": null, "tags": ["a", "b"], "nested": {"k": "v"}}"#;
        let map: BTreeMap<String, ReportValue> = serde_json::from_str(json).unwrap();

        assert_eq!(map["retries"], ReportValue::Integer(3));
        assert_eq!(map["flaky"], ReportValue::Bool(false));
        assert_eq!(map["ratio"], ReportValue::Float(0.5));
        assert!(map["file"].is_null());
        assert_eq!(map["tags"].to_string(), r#"["a","b"]"#);
        assert_eq!(map["nested"].to_string(), r#"{"k":"v"}"#);
    }
}
