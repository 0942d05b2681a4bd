use sqlparser::ast;

use super::AstAdapter;
use crate::{
    ast::types::{Expression, Projection},
    error::AnalysisError
};

impl AstAdapter {
    /// Projection and WHERE predicate of a query body.
    pub(super) fn query_parts(
        &self,
        query: &ast::Query,
        depth: usize
    ) -> Result<(Projection, Option<Expression>), AnalysisError> {
        self.set_expr_parts(&query.body, depth)
    }

    fn set_expr_parts(
        &self,
        set_expr: &ast::SetExpr,
        depth: usize
    ) -> Result<(Projection, Option<Expression>), AnalysisError> {
        self.check_depth(depth)?;
        match set_expr {
            ast::SetExpr::Select(select) => {
                let projection = self.projection(&select.projection, depth)?;
                let predicate = self.optional_expr(select.selection.as_ref(), depth)?;
                Ok((projection, predicate))
            }
            ast::SetExpr::Query(query) => self.query_parts(query, depth + 1),
            ast::SetExpr::SetOperation {
                op,
                left,
                right,
                ..
            } => {
                let (left_proj, left_pred) = self.set_expr_parts(left, depth + 1)?;
                let (right_proj, right_pred) = self.set_expr_parts(right, depth + 1)?;
                let mut columns = into_columns(left_proj);
                columns.extend(into_columns(right_proj));
                let branches: Vec<Expression> = left_pred.into_iter().chain(right_pred).collect();
                let predicate =
                    (!branches.is_empty()).then(|| Expression::unknown(op.to_string(), branches));
                Ok((Projection::Columns(columns), predicate))
            }
            _ => Ok((Projection::Columns(Vec::new()), None))
        }
    }

    fn projection(
        &self,
        items: &[ast::SelectItem],
        depth: usize
    ) -> Result<Projection, AnalysisError> {
        if let [ast::SelectItem::Wildcard(_)] = items {
            return Ok(Projection::Star);
        }
        let mut columns = Vec::with_capacity(items.len());
        for item in items {
            let column = match item {
                ast::SelectItem::UnnamedExpr(expr)
                | ast::SelectItem::ExprWithAlias {
                    expr, ..
                } => self.expr(expr, depth)?,
                ast::SelectItem::Wildcard(_) => Expression::column("*"),
                ast::SelectItem::QualifiedWildcard(..) => Expression::column(item.to_string()),
                #[allow(unreachable_patterns)]
                _ => self.unsupported(item.to_string())?
            };
            columns.push(column);
        }
        Ok(Projection::Columns(columns))
    }
}

fn into_columns(projection: Projection) -> Vec<Expression> {
    match projection {
        Projection::Star => vec![Expression::column("*")],
        Projection::Columns(cols) => cols
    }
}
