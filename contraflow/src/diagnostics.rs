//! Diagnostic records and their collector.
//!
//! Construction never unwinds on a recoverable problem: the builder reports
//! into a [`DiagnosticSink`] and keeps going, so a single pass can surface
//! every issue it encounters. The aggregate success flag of
//! [`crate::Cfg::construct_flow`] is derived from the error count collected
//! here.

use serde::Serialize;

use crate::ast::SourceLocation;
use crate::utils::LineIndex;

/// Severity level of a reported diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational note, no impact on the success flag.
    Info,
    /// Suspicious but analyzable construct.
    Warning,
    /// The construct could not be wired correctly; downstream analyses
    /// should not trust graphs from a failed pass.
    Error,
}

impl Severity {
    /// Lowercase display name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single problem reported during flow construction.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    /// Severity level.
    pub severity: Severity,
    /// Source span of the offending construct.
    pub loc: SourceLocation,
    /// Description of the issue.
    pub message: String,
}

impl Diagnostic {
    /// 1-indexed line of the diagnostic in the given source.
    #[must_use]
    pub fn line_in(&self, index: &LineIndex) -> usize {
        index.line_index(self.loc.start)
    }
}

/// Collector the builder reports into.
///
/// Reporting never interrupts the traversal; callers inspect the sink after
/// construction returns.
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    diagnostics: Vec<Diagnostic>,
    errors: usize,
}

impl DiagnosticSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a diagnostic with the given severity.
    pub fn report(&mut self, severity: Severity, loc: SourceLocation, message: impl Into<String>) {
        if severity == Severity::Error {
            self.errors += 1;
        }
        self.diagnostics.push(Diagnostic {
            severity,
            loc,
            message: message.into(),
        });
    }

    /// Records an error-severity diagnostic.
    pub fn error(&mut self, loc: SourceLocation, message: impl Into<String>) {
        self.report(Severity::Error, loc, message);
    }

    /// Records a warning-severity diagnostic.
    pub fn warning(&mut self, loc: SourceLocation, message: impl Into<String>) {
        self.report(Severity::Warning, loc, message);
    }

    /// All diagnostics reported so far, in report order.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Whether any error-severity diagnostic has been reported.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    /// Number of error-severity diagnostics reported so far.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.errors
    }

    /// Total number of diagnostics reported so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Whether the sink is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(start: usize) -> SourceLocation {
        SourceLocation {
            start,
            end: start + 1,
        }
    }

    #[test]
    fn sink_counts_errors_only() {
        let mut sink = DiagnosticSink::new();
        sink.warning(loc(0), "odd but fine");
        assert!(!sink.has_errors());
        sink.error(loc(4), "cannot wire this");
        sink.report(Severity::Info, loc(9), "note");
        assert!(sink.has_errors());
        assert_eq!(sink.error_count(), 1);
        assert_eq!(sink.len(), 3);
    }

    #[test]
    fn diagnostics_map_to_source_lines() {
        let index = LineIndex::new("first\nsecond\n");
        let mut sink = DiagnosticSink::new();
        sink.error(loc(8), "something on line two");
        assert_eq!(sink.diagnostics()[0].line_in(&index), 2);
    }

    #[test]
    fn severity_display_is_lowercase() {
        assert_eq!(Severity::Error.to_string(), "error");
        assert_eq!(Severity::Warning.as_str(), "warning");
    }
}
