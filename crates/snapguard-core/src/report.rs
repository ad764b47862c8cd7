//! Failure reports for `assert`.

use crate::diff::escape_html;
use crate::fingerprint::Fingerprint;
use std::fmt::Write;
use std::path::Path;

/// Saved side of a field the baseline does not have at all.
pub const MISSING_VALUE: &str = "(missing)";

/// Rendered diff of one mismatched field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDiff {
    pub key: String,
    pub diff: String,
}

/// Everything a host needs to show why an assertion failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertReport {
    pub fingerprint: Fingerprint,
    pub canonical_url: String,
    pub suffix: String,
    pub fields: Vec<FieldDiff>,
}

impl AssertReport {
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.key.as_str())
    }
}

/// `[key]` header followed by that field's diff, for every field.
pub fn render_text(report: &AssertReport) -> String {
    let mut out = String::new();
    for field in &report.fields {
        let _ = writeln!(out, "[{}]", field.key);
        out.push_str(&field.diff);
        if !field.diff.ends_with('\n') {
            out.push('\n');
        }
    }
    out
}

/// The text report inside a minimal UTF-8 HTML page.
///
/// Keys are escaped here; diff bodies are inserted as rendered, which is
/// why `diff.escape_html` defaults to on.
pub fn render_html(report: &AssertReport) -> String {
    let mut out = String::from(
        "<!DOCTYPE html>\n<html dir=\"ltr\">\n<head>\n<meta charset=\"UTF-8\">\n</head>\n<body>\n<pre>\n\n",
    );
    for field in &report.fields {
        let _ = writeln!(out, "[{}]", escape_html(&field.key));
        out.push_str(&field.diff);
        if !field.diff.ends_with('\n') {
            out.push('\n');
        }
    }
    out.push_str("</pre>\n</body>\n</html>\n");
    out
}

/// Shown instead of a report when `assert` finds no baseline.
pub fn missing_baseline_message(path: &Path) -> String {
    format!("File not found: {}", path.display())
}

/// Used for a field when the diff renderer fails.
pub fn plain_dump(expected: &str, stored: &str) -> String {
    format!("expected:\n{}\n\nsaved value:\n{}\n", expected, stored)
}
