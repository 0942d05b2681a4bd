//! Analyzer engine: parse, normalize, dispatch rules, order findings.
//!
//! [`Analyzer::analyze`] never fails. Whatever the input, the caller gets a
//! [`Report`]:
//!
//! - a parser rejection becomes a single `syntax-error` finding;
//! - a statement nested deeper than the depth limit becomes a `depth-limit`
//!   finding and the remaining statements are still analyzed;
//! - in strict mode, an unmapped construct becomes an `unsupported-construct`
//!   finding for its statement.
//!
//! Statements are analyzed in parallel with [`rayon`]; the result order is
//! fixed afterwards, so two runs over the same input produce identical
//! reports. Work runs on a dedicated pool whose thread stacks are sized for
//! the depth limit, so deep input never exhausts the caller's stack.
//!
//! # Example
//!
//! ```
//! use sql_lint::{dialect::SqlDialect, engine::analyze, rules::RuleRegistry};
//!
//! let registry = RuleRegistry::with_defaults();
//! let report = analyze("SELECT id FROM users WHERE id = 5", SqlDialect::Generic, &registry);
//!
//! assert!(report.is_clean());
//! assert_eq!(report.statement_count, 1);
//! ```

use std::{
    sync::{Arc, LazyLock},
    time::{SystemTime, UNIX_EPOCH}
};

use indexmap::IndexSet;
use rayon::{ThreadPool, ThreadPoolBuilder, prelude::*};
use sqlparser::ast;

use crate::{
    ast::{AstAdapter, DEFAULT_MAX_DEPTH, Statement},
    config::AnalysisConfig,
    dialect::{SqlDialect, SqlParser, SqlparserParser},
    error::{AnalysisError, syntax_error_position},
    report::{Report, presentation_order},
    rules::{EnabledRule, Finding, RuleContext, RuleRegistry, Severity}
};

/// Rule id of the finding emitted when the parser rejects the input
pub const SYNTAX_ERROR_ID: &str = "syntax-error";
/// Rule id of the finding emitted when a statement nests too deeply
pub const DEPTH_LIMIT_ID: &str = "depth-limit";
/// Rule id of the finding emitted for unmapped constructs in strict mode
pub const UNSUPPORTED_CONSTRUCT_ID: &str = "unsupported-construct";

const BASE_STACK_SIZE: usize = 64 * 1024 * 1024;
const STACK_PER_LEVEL: usize = 64 * 1024;
const MAX_STACK_SIZE: usize = 1024 * 1024 * 1024;

static DEFAULT_ANALYZER: LazyLock<Analyzer> = LazyLock::new(Analyzer::default);

/// Engine settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzerOptions {
    pub max_depth:   usize,
    pub deduplicate: bool,
    pub strict:      bool
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            max_depth:   DEFAULT_MAX_DEPTH,
            deduplicate: false,
            strict:      false
        }
    }
}

impl From<&AnalysisConfig> for AnalyzerOptions {
    fn from(config: &AnalysisConfig) -> Self {
        Self {
            max_depth:   config.max_depth,
            deduplicate: config.deduplicate,
            strict:      config.strict
        }
    }
}

/// Stateless analysis engine.
///
/// Holds only its options and parser; any number of threads may call
/// [`analyze`](Self::analyze) on a shared instance.
#[derive(Clone)]
pub struct Analyzer {
    options: AnalyzerOptions,
    parser:  Arc<dyn SqlParser>,
    pool:    Option<Arc<ThreadPool>>
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(AnalyzerOptions::default())
    }
}

impl std::fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyzer")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Analyzer {
    pub fn new(options: AnalyzerOptions) -> Self {
        Self::with_parser(options, Arc::new(SqlparserParser))
    }

    pub fn with_config(config: &AnalysisConfig) -> Self {
        Self::new(config.into())
    }

    /// Use a custom parser backend
    pub fn with_parser(options: AnalyzerOptions, parser: Arc<dyn SqlParser>) -> Self {
        Self {
            options,
            parser,
            pool: build_pool(options.max_depth)
        }
    }

    pub fn options(&self) -> AnalyzerOptions {
        self.options
    }

    /// Analyze `sql` and stamp the report with the current time
    pub fn analyze(&self, sql: &str, dialect: SqlDialect, registry: &RuleRegistry) -> Report {
        self.analyze_at(sql, dialect, registry, now_ms())
    }

    /// Analyze `sql` with an explicit timestamp.
    ///
    /// Identical arguments always yield an identical report.
    pub fn analyze_at(
        &self,
        sql: &str,
        dialect: SqlDialect,
        registry: &RuleRegistry,
        analyzed_at_ms: u64
    ) -> Report {
        match &self.pool {
            Some(pool) => pool.install(|| self.run(sql, dialect, registry, analyzed_at_ms)),
            None => self.run(sql, dialect, registry, analyzed_at_ms)
        }
    }

    fn run(
        &self,
        sql: &str,
        dialect: SqlDialect,
        registry: &RuleRegistry,
        analyzed_at_ms: u64
    ) -> Report {
        let max_depth = self.options.max_depth;
        let raw = match self.parser.parse(sql, dialect, max_depth) {
            Ok(raw) => raw,
            Err(AnalysisError::Syntax(message)) => {
                tracing::debug!(%dialect, error = %message, "parser rejected input");
                return syntax_error_report(message, dialect, analyzed_at_ms);
            }
            Err(err) => {
                let mut report = Report::new(dialect, 0, analyzed_at_ms);
                report.findings.push(error_finding(&err, None, None));
                return report;
            }
        };

        let adapter = AstAdapter::new(dialect)
            .with_max_depth(max_depth)
            .strict(self.options.strict);
        let ctx = RuleContext {
            dialect,
            max_depth
        };
        let rules: Vec<EnabledRule<'_>> = registry.enabled().collect();

        let outcomes: Vec<Result<Vec<Finding>, AnalysisError>> = raw
            .par_iter()
            .enumerate()
            .map(|(index, stmt)| analyze_statement(&adapter, &ctx, &rules, stmt, index))
            .collect();

        // Failed statements are placed by token scan; their trees may be too
        // deep for span()
        let mut starts = None;
        let mut report = Report::new(dialect, raw.len(), analyzed_at_ms);
        for (index, outcome) in outcomes.into_iter().enumerate() {
            match outcome {
                Ok(findings) => report.findings.extend(findings),
                Err(err) => {
                    let line = starts
                        .get_or_insert_with(|| {
                            statement_lines(self.parser.as_ref(), sql, dialect, raw.len())
                        })
                        .get(index)
                        .copied();
                    report.findings.push(error_finding(&err, Some(index), line));
                }
            }
        }
        if self.options.deduplicate {
            report.findings = report
                .findings
                .into_iter()
                .collect::<IndexSet<_>>()
                .into_iter()
                .collect();
        }
        report.findings.sort_by(presentation_order);

        tracing::debug!(
            %dialect,
            statements = report.statement_count,
            rules = rules.len(),
            findings = report.findings.len(),
            "analysis complete"
        );
        report
    }
}

/// Analyze with default engine options
pub fn analyze(sql: &str, dialect: SqlDialect, registry: &RuleRegistry) -> Report {
    DEFAULT_ANALYZER.analyze(sql, dialect, registry)
}

/// Worker stack size for a depth limit
pub fn stack_size_for(max_depth: usize) -> usize {
    max_depth
        .saturating_mul(STACK_PER_LEVEL)
        .saturating_add(BASE_STACK_SIZE)
        .min(MAX_STACK_SIZE)
}

fn build_pool(max_depth: usize) -> Option<Arc<ThreadPool>> {
    match ThreadPoolBuilder::new()
        .stack_size(stack_size_for(max_depth))
        .thread_name(|i| format!("sql-lint-{}", i))
        .build()
    {
        Ok(pool) => Some(Arc::new(pool)),
        Err(e) => {
            tracing::warn!(error = %e, "falling back to the global thread pool");
            None
        }
    }
}

/// Start lines for every statement, or nothing when they cannot be matched
/// one to one with the parsed statements.
fn statement_lines(
    parser: &dyn SqlParser,
    sql: &str,
    dialect: SqlDialect,
    count: usize
) -> Vec<u64> {
    let lines = parser.statement_lines(sql, dialect);
    if lines.len() == count { lines } else { Vec::new() }
}

fn analyze_statement(
    adapter: &AstAdapter,
    ctx: &RuleContext,
    rules: &[EnabledRule<'_>],
    raw: &ast::Statement,
    index: usize
) -> Result<Vec<Finding>, AnalysisError> {
    let statement = adapter.normalize_statement(raw, index)?;
    evaluate_rules(&statement, ctx, rules)
}

fn evaluate_rules(
    statement: &Statement,
    ctx: &RuleContext,
    rules: &[EnabledRule<'_>]
) -> Result<Vec<Finding>, AnalysisError> {
    let mut findings = Vec::new();
    for enabled in rules {
        for mut finding in enabled.rule.evaluate(statement, ctx)? {
            if let Some(severity) = enabled.severity {
                finding.severity = severity;
            }
            finding.location = finding.location.or(statement.line());
            finding.statement = Some(statement.index);
            findings.push(finding);
        }
    }
    Ok(findings)
}

fn error_finding(err: &AnalysisError, index: Option<usize>, location: Option<u64>) -> Finding {
    tracing::debug!(statement = ?index, error = %err, "statement analysis aborted");
    let (rule_id, severity, message, recommendation) = match err {
        AnalysisError::DepthLimitExceeded {
            limit
        } => (
            DEPTH_LIMIT_ID,
            Severity::Critical,
            format!("Expression nesting exceeds the depth limit of {}", limit),
            "Simplify or split the predicate; this statement was not analyzed.".to_string()
        ),
        AnalysisError::UnsupportedConstruct {
            construct
        } => (
            UNSUPPORTED_CONSTRUCT_ID,
            Severity::Warning,
            format!("Unsupported construct: {}", construct),
            "Disable strict mode to analyze the rest of this statement.".to_string()
        ),
        AnalysisError::Syntax(message) => (
            SYNTAX_ERROR_ID,
            Severity::Critical,
            "Syntax Error".to_string(),
            message.clone()
        )
    };
    Finding {
        rule_id,
        severity,
        message,
        recommendation,
        location,
        statement: index
    }
}

fn syntax_error_report(message: String, dialect: SqlDialect, analyzed_at_ms: u64) -> Report {
    let location = syntax_error_position(&message).map(|pos| pos.line);
    let mut report = Report::new(dialect, 0, analyzed_at_ms);
    report.had_syntax_error = true;
    report.findings.push(Finding {
        rule_id: SYNTAX_ERROR_ID,
        severity: Severity::Critical,
        message: "Syntax Error".to_string(),
        recommendation: message,
        location,
        statement: None
    });
    report
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
