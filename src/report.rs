//! Analysis report: the ordered finding list plus run metadata.

use std::cmp::Ordering;

use serde::Serialize;

use crate::{
    dialect::SqlDialect,
    rules::{Finding, Severity}
};

/// Complete result of one [`analyze`](crate::engine::analyze) call.
///
/// Findings are ordered most severe first, then by source line (unknown
/// lines last), then in the order they were produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// All findings, in presentation order
    pub findings:         Vec<Finding>,
    /// Dialect the input was parsed with
    pub dialect:          SqlDialect,
    /// Number of statements the parser produced
    pub statement_count:  usize,
    /// True when the parser rejected the input
    pub had_syntax_error: bool,
    /// Analysis time in milliseconds since the Unix epoch
    pub analyzed_at_ms:   u64
}

impl Report {
    pub fn new(dialect: SqlDialect, statement_count: usize, analyzed_at_ms: u64) -> Self {
        Self {
            findings: Vec::new(),
            dialect,
            statement_count,
            had_syntax_error: false,
            analyzed_at_ms
        }
    }

    pub fn critical_count(&self) -> usize {
        self.count(Severity::Critical)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn info_count(&self) -> usize {
        self.count(Severity::Info)
    }

    pub fn highest_severity(&self) -> Option<Severity> {
        self.findings.iter().map(|f| f.severity).max()
    }

    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    fn count(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .count()
    }
}

/// Presentation order of two findings, excluding the insertion tie-break.
///
/// Used with a stable sort so equal findings keep their production order.
pub fn presentation_order(a: &Finding, b: &Finding) -> Ordering {
    b.severity
        .cmp(&a.severity)
        .then_with(|| location_key(a.location).cmp(&location_key(b.location)))
}

fn location_key(location: Option<u64>) -> (bool, u64) {
    (location.is_none(), location.unwrap_or(0))
}
