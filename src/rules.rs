//! Rule trait, built-in rules and the rule registry.
//!
//! A rule looks at one normalized [`Statement`] and returns the findings it
//! produces. Rules never see parser types and never mutate their input.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌─────────────┐
//! │ Statements  │────▶│   Analyzer   │────▶│   Report    │
//! └─────────────┘     └──────────────┘     └─────────────┘
//!                            │
//!                     ┌──────┴───────┐
//!                     │ RuleRegistry │
//!                     │  (ordered)   │
//!                     └──────────────┘
//! ```
//!
//! # Built-in rules
//!
//! | ID | Severity | Description |
//! |----|----------|-------------|
//! | `projection-star` | warning | `SELECT *` or a wildcard column in the select list |
//! | `or-condition` | info | one per `OR` node in the WHERE clause |
//! | `leading-wildcard` | critical | `LIKE '%…'` / `ILIKE '%…'` with a literal pattern |
//!
//! # Implementing Custom Rules
//!
//! ```
//! use sql_lint::{
//!     ast::{Statement, StatementKind},
//!     error::AnalysisError,
//!     rules::{Finding, Rule, RuleContext, RuleInfo, RuleRegistry, Severity}
//! };
//!
//! struct DeleteWithoutWhere;
//!
//! impl Rule for DeleteWithoutWhere {
//!     fn info(&self) -> RuleInfo {
//!         RuleInfo {
//!             id:             "delete-without-where",
//!             name:           "DELETE without WHERE",
//!             severity:       Severity::Critical,
//!             message:        "DELETE affects every row",
//!             recommendation: "Add a WHERE clause."
//!         }
//!     }
//!
//!     fn evaluate(
//!         &self,
//!         statement: &Statement,
//!         _ctx: &RuleContext
//!     ) -> Result<Vec<Finding>, AnalysisError> {
//!         if statement.kind == StatementKind::Delete && statement.predicate.is_none() {
//!             return Ok(vec![self.info().finding(statement)]);
//!         }
//!         Ok(vec![])
//!     }
//! }
//!
//! let mut registry = RuleRegistry::with_defaults();
//! registry.register(DeleteWithoutWhere).unwrap();
//! assert_eq!(registry.len(), 4);
//! ```

mod predicate;
mod projection;
mod registry;
mod types;

pub use predicate::{DisjunctivePredicateRule, LeadingWildcardLikeRule};
pub use projection::ProjectionStarRule;
pub use registry::{EnabledRule, RuleRegistry, RuleStatus};
pub use types::{Finding, RuleContext, RuleInfo, Severity};

use crate::{ast::Statement, error::AnalysisError};

/// Trait for implementing SQL analysis rules.
///
/// Rules are stateless, read-only analyzers. They must be `Send + Sync` so a
/// registry can be shared across threads.
pub trait Rule: Send + Sync {
    /// Returns metadata about this rule.
    fn info(&self) -> RuleInfo;

    /// Analyzes a statement and returns any findings.
    ///
    /// # Errors
    ///
    /// Rules that walk expressions propagate
    /// [`AnalysisError::DepthLimitExceeded`] from the traversal.
    fn evaluate(
        &self,
        statement: &Statement,
        ctx: &RuleContext
    ) -> Result<Vec<Finding>, AnalysisError>;
}
