//! SQL dialect tags and the parser boundary.
//!
//! [`SqlDialect`] is the closed set of dialects the analyzer understands.
//! [`SqlParser`] is the only capability the engine needs from a parser; the
//! default [`SqlparserParser`] delegates to the `sqlparser` crate.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use sqlparser::{
    ast,
    dialect::{
        BigQueryDialect, ClickHouseDialect, Dialect, GenericDialect, HiveDialect, MsSqlDialect,
        MySqlDialect, PostgreSqlDialect, RedshiftSqlDialect, SQLiteDialect, SnowflakeDialect
    },
    parser::{Parser, ParserError},
    tokenizer::{Token, Tokenizer}
};

use crate::error::{AnalysisError, config_error};

/// Floor for the parser recursion limit
const MIN_PARSER_DEPTH: usize = 50;

/// SQL dialect for parsing and operator recognition
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum SqlDialect {
    #[default]
    Generic,
    MySQL,
    MariaDB,
    PostgreSQL,
    TransactSQL,
    BigQuery,
    SQLite,
    Snowflake,
    Redshift,
    Hive,
    ClickHouse
}

impl SqlDialect {
    pub const ALL: [SqlDialect; 11] = [
        Self::Generic,
        Self::MySQL,
        Self::MariaDB,
        Self::PostgreSQL,
        Self::TransactSQL,
        Self::BigQuery,
        Self::SQLite,
        Self::Snowflake,
        Self::Redshift,
        Self::Hive,
        Self::ClickHouse
    ];

    /// Convert to sqlparser dialect for parsing
    ///
    /// MariaDB has no dedicated parser dialect and shares MySQL's.
    pub fn into_parser_dialect(self) -> Box<dyn Dialect> {
        match self {
            Self::Generic => Box::new(GenericDialect {}),
            Self::MySQL | Self::MariaDB => Box::new(MySqlDialect {}),
            Self::PostgreSQL => Box::new(PostgreSqlDialect {}),
            Self::TransactSQL => Box::new(MsSqlDialect {}),
            Self::BigQuery => Box::new(BigQueryDialect {}),
            Self::SQLite => Box::new(SQLiteDialect {}),
            Self::Snowflake => Box::new(SnowflakeDialect {}),
            Self::Redshift => Box::new(RedshiftSqlDialect {}),
            Self::Hive => Box::new(HiveDialect {}),
            Self::ClickHouse => Box::new(ClickHouseDialect {})
        }
    }

    /// Operator spellings that mean logical OR in this dialect.
    pub fn or_tokens(self) -> &'static [&'static str] {
        match self {
            Self::MySQL | Self::MariaDB => &["OR", "||"],
            _ => &["OR"]
        }
    }

    /// Case-insensitive check against [`or_tokens`](Self::or_tokens).
    pub fn is_or_operator(self, operator: &str) -> bool {
        self.or_tokens()
            .iter()
            .any(|token| token.eq_ignore_ascii_case(operator))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::MySQL => "mysql",
            Self::MariaDB => "mariadb",
            Self::PostgreSQL => "postgresql",
            Self::TransactSQL => "transactsql",
            Self::BigQuery => "bigquery",
            Self::SQLite => "sqlite",
            Self::Snowflake => "snowflake",
            Self::Redshift => "redshift",
            Self::Hive => "hive",
            Self::ClickHouse => "clickhouse"
        }
    }
}

impl fmt::Display for SqlDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SqlDialect {
    type Err = masterror::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| config_error(format!("Unknown SQL dialect '{}'", s)))
    }
}

/// Capability to turn SQL text into sqlparser statements.
pub trait SqlParser: Send + Sync {
    /// Parse `sql`, allowing roughly `max_depth` levels of parser recursion.
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::Syntax`] with the parser's message
    /// - [`AnalysisError::DepthLimitExceeded`] when nesting outruns `max_depth`
    fn parse(
        &self,
        sql: &str,
        dialect: SqlDialect,
        max_depth: usize
    ) -> Result<Vec<ast::Statement>, AnalysisError>;

    /// 1-based start line of each top-level statement, in parse order.
    ///
    /// Used to place findings for statements that could not be normalized.
    /// An empty result means lines are unknown.
    fn statement_lines(&self, _sql: &str, _dialect: SqlDialect) -> Vec<u64> {
        Vec::new()
    }
}

/// [`SqlParser`] backed by the `sqlparser` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlparserParser;

impl SqlParser for SqlparserParser {
    fn parse(
        &self,
        sql: &str,
        dialect: SqlDialect,
        max_depth: usize
    ) -> Result<Vec<ast::Statement>, AnalysisError> {
        let parser_dialect = dialect.into_parser_dialect();
        let limit = max_depth.max(MIN_PARSER_DEPTH);
        Parser::new(parser_dialect.as_ref())
            .with_recursion_limit(limit)
            .try_with_sql(sql)
            .and_then(|mut parser| parser.parse_statements())
            .map_err(|e| match e {
                ParserError::RecursionLimitExceeded => AnalysisError::DepthLimitExceeded {
                    limit
                },
                other => AnalysisError::Syntax(other.to_string())
            })
    }

    fn statement_lines(&self, sql: &str, dialect: SqlDialect) -> Vec<u64> {
        let parser_dialect = dialect.into_parser_dialect();
        let Ok(tokens) = Tokenizer::new(parser_dialect.as_ref(), sql).tokenize_with_location()
        else {
            return Vec::new();
        };
        // A statement starts at the first significant token after a run of
        // semicolons, the same split the parser applies.
        let mut lines = Vec::new();
        let mut at_start = true;
        for token in &tokens {
            match token.token {
                Token::Whitespace(_) => {}
                Token::SemiColon => at_start = true,
                Token::EOF => break,
                _ if at_start => {
                    lines.push(token.span.start.line);
                    at_start = false;
                }
                _ => {}
            }
        }
        lines
    }
}
