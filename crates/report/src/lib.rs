//! StyleZone Bug Report Generator
//!
//! Turns UI test failures into bug reports. A test-failure hook hands the
//! generator a [`FailureEvent`]; the generator assigns a time-derived id,
//! normalizes the event into an immutable [`FailureReport`] and writes it in
//! three formats:
//!
//! ```text
//! <report_dir>/
//!   BUG_<YYYYMMDD_HHMMSS>.json   structured record, pretty-printed
//!   BUG_<YYYYMMDD_HHMMSS>.md     narrative Markdown document
//!   BUG_<YYYYMMDD_HHMMSS>.html   self-contained styled HTML document
//! ```
//!
//! Browser automation itself lives in the test harness; this crate only
//! sees the failure data it collects.

pub mod config;
pub mod environment;
pub mod error;
pub mod event;
pub mod generator;
pub mod hook;
pub mod render;
pub mod types;

pub use config::ReportConfig;
pub use error::{ReportError, ReportResult};
pub use event::FailureEvent;
pub use generator::{ReportGenerator, ReportSummary};
pub use hook::{FailureHook, GeneratedReport};
pub use render::ReportFormat;
pub use types::{FailureReport, ReportId, ReportStatus, ReportValue};

/// Crate version, recorded in the default environment
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
