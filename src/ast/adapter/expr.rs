use sqlparser::ast::{self, Expr, Value};

use super::AstAdapter;
use crate::{
    ast::types::{Expression, LiteralKind},
    error::AnalysisError
};

impl AstAdapter {
    pub(super) fn optional_expr(
        &self,
        expr: Option<&Expr>,
        depth: usize
    ) -> Result<Option<Expression>, AnalysisError> {
        expr.map(|e| self.expr(e, depth)).transpose()
    }

    /// Map one sqlparser expression. `depth` is the nesting level of `expr`.
    pub(super) fn expr(&self, expr: &Expr, depth: usize) -> Result<Expression, AnalysisError> {
        self.check_depth(depth)?;
        let next = depth + 1;
        let mapped = match expr {
            Expr::Identifier(ident) => Expression::column(ident.value.as_str()),
            Expr::CompoundIdentifier(idents) => Expression::column(
                idents
                    .iter()
                    .map(|i| i.value.as_str())
                    .collect::<Vec<_>>()
                    .join(".")
            ),
            Expr::Wildcard(..) => Expression::column("*"),
            Expr::QualifiedWildcard(..) => Expression::column(expr.to_string()),
            Expr::Value(val) => literal(&val.value),
            Expr::Nested(inner) => return self.expr(inner, depth),
            Expr::BinaryOp {
                left,
                op,
                right,
                ..
            } => Expression::binary(
                op.to_string(),
                self.expr(left, next)?,
                self.expr(right, next)?
            ),
            Expr::Like {
                negated,
                expr: target,
                pattern,
                ..
            } => Expression::binary(
                if *negated { "NOT LIKE" } else { "LIKE" },
                self.expr(target, next)?,
                self.expr(pattern, next)?
            ),
            Expr::ILike {
                negated,
                expr: target,
                pattern,
                ..
            } => Expression::binary(
                if *negated { "NOT ILIKE" } else { "ILIKE" },
                self.expr(target, next)?,
                self.expr(pattern, next)?
            ),
            Expr::UnaryOp {
                op,
                expr: inner,
                ..
            } => Expression::unknown(op.to_string(), vec![self.expr(inner, next)?]),
            Expr::IsNull(inner) => Expression::unknown("IS NULL", vec![self.expr(inner, next)?]),
            Expr::IsNotNull(inner) => {
                Expression::unknown("IS NOT NULL", vec![self.expr(inner, next)?])
            }
            Expr::InList {
                expr: target,
                list,
                negated,
                ..
            } => {
                let mut children = Vec::with_capacity(list.len() + 1);
                children.push(self.expr(target, next)?);
                for item in list {
                    children.push(self.expr(item, next)?);
                }
                Expression::unknown(if *negated { "NOT IN" } else { "IN" }, children)
            }
            Expr::InSubquery {
                expr: target,
                subquery,
                negated,
                ..
            } => {
                let mut children = vec![self.expr(target, next)?];
                children.extend(self.subquery_predicate(subquery, next)?);
                Expression::unknown(if *negated { "NOT IN" } else { "IN" }, children)
            }
            Expr::Between {
                expr: target,
                low,
                high,
                negated,
                ..
            } => Expression::unknown(
                if *negated { "NOT BETWEEN" } else { "BETWEEN" },
                vec![
                    self.expr(target, next)?,
                    self.expr(low, next)?,
                    self.expr(high, next)?,
                ]
            ),
            Expr::Function(func) => {
                let mut children = Vec::new();
                if let ast::FunctionArguments::List(arg_list) = &func.args {
                    for arg in &arg_list.args {
                        if let ast::FunctionArg::Unnamed(ast::FunctionArgExpr::Expr(e)) = arg {
                            children.push(self.expr(e, next)?);
                        }
                    }
                }
                Expression::unknown(func.name.to_string(), children)
            }
            Expr::Case {
                operand,
                conditions,
                else_result,
                ..
            } => {
                let mut children = Vec::new();
                if let Some(op) = operand {
                    children.push(self.expr(op, next)?);
                }
                for case_when in conditions {
                    children.push(self.expr(&case_when.condition, next)?);
                    children.push(self.expr(&case_when.result, next)?);
                }
                if let Some(else_res) = else_result {
                    children.push(self.expr(else_res, next)?);
                }
                Expression::unknown("CASE", children)
            }
            Expr::Cast {
                expr: inner, ..
            } => Expression::unknown("CAST", vec![self.expr(inner, next)?]),
            Expr::Subquery(query) => {
                Expression::unknown("SUBQUERY", self.subquery_predicate(query, next)?)
            }
            Expr::Exists {
                subquery,
                negated,
                ..
            } => Expression::unknown(
                if *negated { "NOT EXISTS" } else { "EXISTS" },
                self.subquery_predicate(subquery, next)?
            ),
            _ => self.unsupported(expr.to_string())?
        };
        Ok(mapped)
    }

    /// Degrade an unmapped node to an opaque leaf, or fail in strict mode.
    pub(super) fn unsupported(&self, construct: String) -> Result<Expression, AnalysisError> {
        if self.strict {
            return Err(AnalysisError::UnsupportedConstruct {
                construct
            });
        }
        tracing::debug!(%construct, "unsupported construct degraded to opaque expression");
        Ok(Expression::unknown(construct, Vec::new()))
    }

    fn subquery_predicate(
        &self,
        query: &ast::Query,
        depth: usize
    ) -> Result<Vec<Expression>, AnalysisError> {
        let (_, predicate) = self.query_parts(query, depth)?;
        Ok(predicate.into_iter().collect())
    }
}

fn literal(value: &Value) -> Expression {
    match value {
        Value::SingleQuotedString(s)
        | Value::DoubleQuotedString(s)
        | Value::NationalStringLiteral(s)
        | Value::EscapedStringLiteral(s) => Expression::string(s.as_str()),
        Value::Number(n, _) => Expression::number(n.to_string()),
        Value::Placeholder(p) => Expression::unknown(p.as_str(), Vec::new()),
        other => Expression::Literal {
            value: other.to_string(),
            kind:  LiteralKind::Other
        }
    }
}
