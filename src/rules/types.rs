//! Type definitions for the rule system.
//!
//! - [`Severity`] - Finding severity levels (Info, Warning, Critical)
//! - [`RuleInfo`] - Rule metadata and message templates
//! - [`Finding`] - A single reported issue
//! - [`RuleContext`] - Per-run settings handed to every rule

use serde::{Deserialize, Serialize};

use crate::{ast::Statement, dialect::SqlDialect};

/// Severity level of a finding.
///
/// Ordered from lowest to highest severity for sorting purposes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational suggestion
    Info,
    /// Likely problem worth reviewing (exit code 1)
    Warning,
    /// Issue that must be addressed (exit code 2)
    Critical
}

impl Severity {
    /// Parse a severity name from configuration.
    ///
    /// `error` is accepted as an alias for `critical`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "critical" | "error" => Some(Self::Critical),
            "warning" | "warn" => Some(Self::Warning),
            "info" => Some(Self::Info),
            _ => None
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARN"),
            Self::Critical => write!(f, "CRITICAL")
        }
    }
}

/// Metadata about a rule for identification and configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleInfo {
    /// Unique, stable identifier (e.g., "or-condition")
    pub id:             &'static str,
    /// Human-readable rule name
    pub name:           &'static str,
    /// Default severity level
    pub severity:       Severity,
    /// Message template; `{key}` placeholders are filled by [`render`](Self::render)
    pub message:        &'static str,
    /// Fix suggestion attached to every finding
    pub recommendation: &'static str
}

impl RuleInfo {
    /// Finding for `statement` with the message template as-is.
    pub fn finding(&self, statement: &Statement) -> Finding {
        self.finding_with(statement, &[])
    }

    /// Finding for `statement` with placeholders resolved from `args`.
    pub fn finding_with(&self, statement: &Statement, args: &[(&str, &str)]) -> Finding {
        Finding {
            rule_id:        self.id,
            severity:       self.severity,
            message:        self.render(args),
            recommendation: self.recommendation.to_string(),
            location:       statement.line(),
            statement:      Some(statement.index)
        }
    }

    /// Resolve `{key}` placeholders in the message template.
    pub fn render(&self, args: &[(&str, &str)]) -> String {
        args.iter()
            .fold(self.message.to_string(), |msg, (key, value)| {
                msg.replace(&format!("{{{}}}", key), value)
            })
    }
}

/// A single issue produced by a rule against a statement.
///
/// Findings are plain values: two findings are duplicates when every field
/// matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Finding {
    /// Identifier of the rule that produced this finding
    pub rule_id:        &'static str,
    /// Effective severity (after registry overrides)
    pub severity:       Severity,
    /// Resolved message
    pub message:        String,
    /// Suggested fix
    pub recommendation: String,
    /// 1-based source line, when known
    pub location:       Option<u64>,
    /// Zero-based index of the statement in the input, when applicable
    pub statement:      Option<usize>
}

/// Settings shared by every rule during one analysis run.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext {
    pub dialect:   SqlDialect,
    pub max_depth: usize
}
