//! Parser-independent statement model and the adapter that builds it.
//!
//! Rules never see `sqlparser` types. [`AstAdapter`] translates each parsed
//! statement into a [`Statement`] whose WHERE clause is a tree of
//! [`Expression`] nodes:
//!
//! ```text
//! sqlparser::ast::Statement ──▶ AstAdapter ──▶ Statement { kind, projection, predicate }
//! ```
//!
//! Shapes the adapter has no dedicated variant for become
//! [`Expression::Unknown`] nodes, so rules can still tell that an expression
//! exists and keep walking into its children.
//!
//! # Example
//!
//! ```
//! use sql_lint::{
//!     ast::{AstAdapter, Projection, StatementKind},
//!     dialect::{SqlDialect, SqlParser, SqlparserParser}
//! };
//!
//! let raw = SqlparserParser
//!     .parse("SELECT * FROM users WHERE id = 1", SqlDialect::Generic, 64)
//!     .unwrap();
//! let statements = AstAdapter::new(SqlDialect::Generic).normalize(&raw).unwrap();
//!
//! assert_eq!(statements[0].kind, StatementKind::Select);
//! assert_eq!(statements[0].projection, Projection::Star);
//! assert!(statements[0].predicate.is_some());
//! ```

mod adapter;
mod types;

pub use adapter::{AstAdapter, DEFAULT_MAX_DEPTH};
pub use types::{
    Expression, LiteralKind, Projection, SourceLocation, Statement, StatementKind
};
