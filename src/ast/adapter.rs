mod expr;
mod query;

use sqlparser::ast::{self, Spanned};

use super::types::{SourceLocation, Statement, StatementKind};
use crate::{dialect::SqlDialect, error::AnalysisError};

/// Default cap on expression nesting
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Translates sqlparser statements into [`Statement`]s
#[derive(Debug, Clone, Copy)]
pub struct AstAdapter {
    dialect:   SqlDialect,
    max_depth: usize,
    strict:    bool
}

impl AstAdapter {
    /// Lenient adapter with the default depth limit
    pub fn new(dialect: SqlDialect) -> Self {
        Self {
            dialect,
            max_depth: DEFAULT_MAX_DEPTH,
            strict: false
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// In strict mode unmapped expressions fail with
    /// [`AnalysisError::UnsupportedConstruct`] instead of degrading.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn dialect(&self) -> SqlDialect {
        self.dialect
    }

    /// Normalize every statement, failing on the first one that cannot be
    /// mapped.
    pub fn normalize(&self, raw: &[ast::Statement]) -> Result<Vec<Statement>, AnalysisError> {
        raw.iter()
            .enumerate()
            .map(|(index, stmt)| self.normalize_statement(stmt, index))
            .collect()
    }

    /// Normalize a single statement
    pub fn normalize_statement(
        &self,
        raw: &ast::Statement,
        index: usize
    ) -> Result<Statement, AnalysisError> {
        let mut stmt = match raw {
            ast::Statement::Query(query) => {
                let mut stmt = Statement::new(index, StatementKind::Select);
                let (projection, predicate) = self.query_parts(query, 1)?;
                stmt.projection = projection;
                stmt.predicate = predicate;
                stmt
            }
            ast::Statement::Insert(insert) => {
                let mut stmt = Statement::new(index, StatementKind::Insert);
                if let Some(source) = &insert.source {
                    let (projection, predicate) = self.query_parts(source, 1)?;
                    stmt.projection = projection;
                    stmt.predicate = predicate;
                }
                stmt
            }
            ast::Statement::Update(update) => {
                let mut stmt = Statement::new(index, StatementKind::Update);
                stmt.predicate = self.optional_expr(update.selection.as_ref(), 1)?;
                stmt
            }
            ast::Statement::Delete(delete) => {
                let mut stmt = Statement::new(index, StatementKind::Delete);
                stmt.predicate = self.optional_expr(delete.selection.as_ref(), 1)?;
                stmt
            }
            _ => Statement::new(index, StatementKind::Other)
        };
        // span() walks the whole tree; only reached once mapping stayed in bounds
        stmt.location = source_location(raw);
        tracing::trace!(index, kind = %stmt.kind, "normalized statement");
        Ok(stmt)
    }

    fn check_depth(&self, depth: usize) -> Result<(), AnalysisError> {
        if depth > self.max_depth {
            return Err(AnalysisError::DepthLimitExceeded {
                limit: self.max_depth
            });
        }
        Ok(())
    }
}

fn source_location(raw: &ast::Statement) -> Option<SourceLocation> {
    let start = raw.span().start;
    (start.line > 0).then_some(SourceLocation {
        line:   start.line,
        column: start.column
    })
}
