//! Report renderers
//!
//! Each renderer is a pure function of a [`FailureReport`] (plus the path the
//! output will be written to, which appears in the footer). They share no
//! state, so every format can be checked against the same fixture record.

pub mod html;
pub mod json;
pub mod markdown;

use std::path::{Path, PathBuf};

use crate::types::ReportId;

/// The three persisted representations of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportFormat {
    Json,
    Markdown,
    Html,
}

impl ReportFormat {
    /// Write order used by the generator
    pub const ALL: [ReportFormat; 3] = [ReportFormat::Json, ReportFormat::Markdown, ReportFormat::Html];

    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Json => "json",
            ReportFormat::Markdown => "md",
            ReportFormat::Html => "html",
        }
    }

    /// `<dir>/<report_id>.<ext>`
    pub fn path_in(&self, dir: &Path, id: &ReportId) -> PathBuf {
        dir.join(format!("{}.{}", id, self.extension()))
    }
}

/// Footer shown at the end of the narrative and HTML documents
#[derive(Debug, Clone, Copy)]
pub struct Footer<'a> {
    pub framework_name: &'a str,
    /// Where the rendered document is being written
    pub location: &'a Path,
}

/// `browser_version` -> `Browser Version`.
///
/// Underscores become spaces; a letter following a non-letter is upper-cased
/// and every other letter lower-cased.
pub fn humanize_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut prev_is_letter = false;

    for c in key.chars() {
        let c = if c == '_' { ' ' } else { c };
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }

    out
}

/// Escape HTML special characters
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
