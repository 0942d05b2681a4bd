use super::{Finding, Rule, RuleContext, RuleInfo, Severity};
use crate::{ast::Statement, error::AnalysisError};

/// `SELECT *`, or any wildcard column in the select list
///
/// Fires at most once per statement, however many wildcards it projects.
pub struct ProjectionStarRule;

impl Rule for ProjectionStarRule {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:             "projection-star",
            name:           "Unbounded projection",
            severity:       Severity::Warning,
            message:        "Avoid unbounded projection",
            recommendation: "List columns explicitly to reduce I/O and bandwidth."
        }
    }

    fn evaluate(
        &self,
        statement: &Statement,
        _ctx: &RuleContext
    ) -> Result<Vec<Finding>, AnalysisError> {
        if statement.projection.has_wildcard() {
            return Ok(vec![self.info().finding(statement)]);
        }
        Ok(vec![])
    }
}
