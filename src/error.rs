//! Error types and constructors.
//!
//! Two layers of errors live here:
//!
//! - [`AnalysisError`] - the analysis taxonomy. These never escape
//!   [`Analyzer::analyze`](crate::engine::Analyzer::analyze); the engine turns
//!   each of them into a finding.
//! - [`AppError`] - configuration, registry and I/O failures surfaced to the
//!   caller, built through the constructor helpers below.

use std::sync::LazyLock;

pub use masterror::{AppError, AppResult};
use regex::Regex;
use thiserror::Error;

/// Failures raised while turning SQL text into findings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// The parser rejected the input.
    #[error("syntax error: {0}")]
    Syntax(String),

    /// The adapter met a tree shape it cannot map (strict mode only).
    #[error("unsupported construct: {construct}")]
    UnsupportedConstruct { construct: String },

    /// Expression nesting is deeper than the configured limit.
    #[error("expression nesting exceeds depth limit of {limit}")]
    DepthLimitExceeded { limit: usize }
}

/// Create file read error
pub fn file_read_error(path: &str, source: std::io::Error) -> AppError {
    AppError::internal(format!("Failed to read file '{}': {}", path, source))
}

/// Create config error
pub fn config_error(message: impl Into<String>) -> AppError {
    AppError::bad_request(message.into())
}

/// Create error for a rule id the registry does not know
pub fn unknown_rule_error(id: &str) -> AppError {
    AppError::not_found(format!("Unknown rule '{}'", id))
}

/// Create error for a rule id registered twice
pub fn duplicate_rule_error(id: &str) -> AppError {
    AppError::conflict(format!("Rule '{}' is already registered", id))
}

/// Create output rendering error
pub fn render_error(message: impl Into<String>) -> AppError {
    AppError::internal(message.into())
}

/// Position reported by the SQL parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SqlPosition {
    pub line:   u64,
    pub column: u64
}

static POSITION_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"Line:\s*(\d+),\s*Column:?\s*(\d+)").ok());

/// Extract the `Line: X, Column: Y` position from a parser error message.
pub fn syntax_error_position(message: &str) -> Option<SqlPosition> {
    let caps = POSITION_RE.as_ref()?.captures(message)?;
    let line = caps.get(1)?.as_str().parse().ok()?;
    let column = caps.get(2)?.as_str().parse().ok()?;
    Some(SqlPosition {
        line,
        column
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_with_column_colon() {
        let pos = syntax_error_position("Expected: ), found: EOF at Line: 3, Column: 25");
        assert_eq!(
            pos,
            Some(SqlPosition {
                line:   3,
                column: 25
            })
        );
    }

    #[test]
    fn position_without_column_colon() {
        let pos = syntax_error_position("Missing token at Line: 1, Column 7");
        assert_eq!(pos.map(|p| p.line), Some(1));
    }

    #[test]
    fn no_position() {
        assert!(syntax_error_position("sql parser error: unexpected end").is_none());
    }
}
