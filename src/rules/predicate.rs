use super::{Finding, Rule, RuleContext, RuleInfo, Severity};
use crate::{
    ast::{Expression, LiteralKind, Statement},
    error::AnalysisError,
    walk::collect_matching
};

const LIKE_OPERATORS: [&str; 4] = ["LIKE", "ILIKE", "NOT LIKE", "NOT ILIKE"];

/// Every OR node in the WHERE clause
///
/// One finding per OR site, nested ones included. Each disjunction can keep
/// the planner from using a single index.
pub struct DisjunctivePredicateRule;

impl Rule for DisjunctivePredicateRule {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:             "or-condition",
            name:           "OR condition in predicate",
            severity:       Severity::Info,
            message:        "OR condition may prevent index usage",
            recommendation: "Rewrite with IN or split into UNION ALL branches so each can use an \
                             index."
        }
    }

    fn evaluate(
        &self,
        statement: &Statement,
        ctx: &RuleContext
    ) -> Result<Vec<Finding>, AnalysisError> {
        let Some(predicate) = &statement.predicate else {
            return Ok(vec![]);
        };
        let info = self.info();
        let ors = collect_matching(predicate, ctx.max_depth, |expr| {
            matches!(expr, Expression::BinaryOp { operator, .. } if ctx.dialect.is_or_operator(operator))
        })?;
        Ok(ors.iter().map(|_| info.finding(statement)).collect())
    }
}

/// LIKE / ILIKE with a literal pattern starting with `%`
///
/// Only string literals are inspected; parameters and column operands are
/// never flagged.
pub struct LeadingWildcardLikeRule;

impl Rule for LeadingWildcardLikeRule {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:             "leading-wildcard",
            name:           "Leading wildcard in LIKE",
            severity:       Severity::Critical,
            message:        "Leading wildcard in pattern '{pattern}' prevents index usage",
            recommendation: "Consider full-text search instead of a leading-wildcard pattern."
        }
    }

    fn evaluate(
        &self,
        statement: &Statement,
        ctx: &RuleContext
    ) -> Result<Vec<Finding>, AnalysisError> {
        let Some(predicate) = &statement.predicate else {
            return Ok(vec![]);
        };
        let info = self.info();
        let matches = collect_matching(predicate, ctx.max_depth, |expr| {
            leading_wildcard_pattern(expr).is_some()
        })?;
        Ok(matches
            .into_iter()
            .filter_map(leading_wildcard_pattern)
            .map(|pattern| info.finding_with(statement, &[("pattern", pattern)]))
            .collect())
    }
}

fn leading_wildcard_pattern(expr: &Expression) -> Option<&str> {
    let Expression::BinaryOp {
        operator,
        right,
        ..
    } = expr
    else {
        return None;
    };
    if !LIKE_OPERATORS
        .iter()
        .any(|op| op.eq_ignore_ascii_case(operator))
    {
        return None;
    }
    match right.as_ref() {
        Expression::Literal {
            value,
            kind: LiteralKind::String
        } if value.starts_with('%') => Some(value.as_str()),
        _ => None
    }
}
