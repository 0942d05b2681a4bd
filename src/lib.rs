//! # SQL Lint
//!
//! Rule-based static analysis of SQL statements.
//!
//! SQL text is parsed with [`sqlparser`] for a chosen [`dialect`], each
//! statement is normalized into a small dialect-independent tree
//! ([`ast`]), and every enabled [`rules`] entry inspects that tree. The
//! [`engine`] collects the findings into a [`report`] ordered by severity
//! and source line.
//!
//! ```
//! use sql_lint::{dialect::SqlDialect, engine::analyze, rules::{RuleRegistry, Severity}};
//!
//! let registry = RuleRegistry::with_defaults();
//! let report = analyze(
//!     "SELECT * FROM users WHERE name LIKE '%son'",
//!     SqlDialect::PostgreSQL,
//!     &registry
//! );
//!
//! assert_eq!(report.findings.len(), 2);
//! assert_eq!(report.findings[0].severity, Severity::Critical);
//! assert_eq!(report.findings[0].rule_id, "leading-wildcard");
//! ```
//!
//! # Built-in Rules
//!
//! | ID | Severity | Flags |
//! |----|----------|-------|
//! | `projection-star` | warning | `SELECT *` or `t.*` in the projection |
//! | `or-condition` | info | each `OR` in a predicate |
//! | `leading-wildcard` | critical | `LIKE '%...'` with a leading wildcard |
//!
//! # Exit Codes
//!
//! The `sql-lint` binary exits with `2` on any critical finding, `1` on any
//! warning and `0` otherwise.
//!
//! # Modules
//!
//! - [`engine`] - analysis pipeline and its options
//! - [`rules`] - rule trait, built-in rules and the registry
//! - [`ast`] - normalized statement tree and the sqlparser adapter
//! - [`walk`] - depth-bounded traversal
//! - [`config`] - configuration loading
//! - [`output`] - report rendering

pub mod app;
pub mod ast;
pub mod cli;
pub mod config;
pub mod dialect;
pub mod engine;
pub mod error;
pub mod output;
pub mod report;
pub mod rules;
pub mod walk;
