//! Application logic for the `sql-lint` CLI.
//!
//! Kept apart from the entry point so commands can be driven from tests.

use std::{
    fs::read_to_string,
    io::{self, Read},
    path::Path
};

use crate::{
    cli::{Dialect, Format},
    config::Config,
    dialect::SqlDialect,
    engine::{Analyzer, AnalyzerOptions},
    error::{AppResult, file_read_error},
    output::{OutputFormat, OutputOptions, format_report, format_rules},
    report::Report,
    rules::{RuleRegistry, Severity}
};

/// Parameters for the analyze command
#[derive(Debug, Clone, Default)]
pub struct AnalyzeParams {
    /// Path to the SQL input, `-` for stdin
    pub queries_path:  String,
    /// Dialect from the command line; falls back to config, then generic
    pub dialect:       Option<Dialect>,
    pub output_format: Option<Format>,
    /// Rule ids disabled on top of the config file
    pub disabled:      Vec<String>,
    pub max_depth:     Option<usize>,
    pub dedup:         bool,
    pub strict:        bool,
    pub no_color:      bool
}

/// Rendered analysis with the process exit code
#[derive(Debug, Clone)]
pub struct AnalyzeOutcome {
    pub exit_code: i32,
    pub output:    String,
    pub report:    Report
}

/// Convert CLI dialect to internal SqlDialect
pub fn convert_dialect(dialect: Dialect) -> SqlDialect {
    match dialect {
        Dialect::Generic => SqlDialect::Generic,
        Dialect::Mysql => SqlDialect::MySQL,
        Dialect::Mariadb => SqlDialect::MariaDB,
        Dialect::Postgresql => SqlDialect::PostgreSQL,
        Dialect::Transactsql => SqlDialect::TransactSQL,
        Dialect::Bigquery => SqlDialect::BigQuery,
        Dialect::Sqlite => SqlDialect::SQLite,
        Dialect::Snowflake => SqlDialect::Snowflake,
        Dialect::Redshift => SqlDialect::Redshift,
        Dialect::Hive => SqlDialect::Hive,
        Dialect::Clickhouse => SqlDialect::ClickHouse
    }
}

/// Convert CLI format to internal OutputFormat
pub fn convert_format(format: Format) -> OutputFormat {
    match format {
        Format::Text => OutputFormat::Text,
        Format::Json => OutputFormat::Json,
        Format::Yaml => OutputFormat::Yaml
    }
}

/// Exit code for the highest severity in the report
///
/// - `2` - at least one critical finding
/// - `1` - at least one warning
/// - `0` - clean or informational only
pub fn calculate_exit_code(report: &Report) -> i32 {
    match report.highest_severity() {
        Some(Severity::Critical) => 2,
        Some(Severity::Warning) => 1,
        _ => 0
    }
}

/// Read queries from file or stdin
pub fn read_queries_input(path: &str) -> AppResult<String> {
    if path == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| file_read_error("stdin", e))?;
        Ok(buffer)
    } else {
        read_to_string(Path::new(path)).map_err(|e| file_read_error(path, e))
    }
}

/// Create output options from parameters
pub fn create_output_options(format: Option<Format>, no_color: bool) -> OutputOptions {
    OutputOptions {
        format:  format.map(convert_format).unwrap_or_default(),
        colored: !no_color
    }
}

/// Registry from config with command-line disables applied
pub fn build_registry(config: &Config, disabled: &[String]) -> AppResult<RuleRegistry> {
    let mut registry = RuleRegistry::with_config(&config.rules);
    for id in disabled {
        registry.disable(id)?;
    }
    Ok(registry)
}

/// Engine options from config, overridden by command-line flags
pub fn build_options(config: &Config, params: &AnalyzeParams) -> AnalyzerOptions {
    let mut options = AnalyzerOptions::from(&config.analysis);
    if let Some(max_depth) = params.max_depth {
        options.max_depth = max_depth;
    }
    options.deduplicate |= params.dedup;
    options.strict |= params.strict;
    options
}

/// Analyze SQL text that is already in memory
pub fn analyze_source(sql: &str, params: &AnalyzeParams, config: &Config) -> AppResult<AnalyzeOutcome> {
    let registry = build_registry(config, &params.disabled)?;
    let dialect = params
        .dialect
        .map(convert_dialect)
        .or(config.dialect)
        .unwrap_or_default();
    let analyzer = Analyzer::new(build_options(config, params));
    let report = analyzer.analyze(sql, dialect, &registry);
    let output_opts = create_output_options(params.output_format, params.no_color);
    let output = format_report(&report, &output_opts)?;
    Ok(AnalyzeOutcome {
        exit_code: calculate_exit_code(&report),
        output,
        report
    })
}

/// Run the analyze command
pub fn run_analyze(params: &AnalyzeParams, config: &Config) -> AppResult<AnalyzeOutcome> {
    let sql = read_queries_input(&params.queries_path)?;
    analyze_source(&sql, params, config)
}

/// Run the rules command
pub fn list_rules(format: Format, config: &Config) -> AppResult<String> {
    let registry = RuleRegistry::with_config(&config.rules);
    let opts = create_output_options(Some(format), true);
    format_rules(&registry.statuses(), &opts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> AnalyzeParams {
        AnalyzeParams {
            no_color: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_convert_dialect_mariadb() {
        assert_eq!(convert_dialect(Dialect::Mariadb), SqlDialect::MariaDB);
    }

    #[test]
    fn test_convert_format_yaml() {
        assert_eq!(convert_format(Format::Yaml), OutputFormat::Yaml);
    }

    #[test]
    fn test_exit_code_levels() {
        let config = Config::default();
        let critical = analyze_source("SELECT a FROM t WHERE b LIKE '%x'", &params(), &config);
        let warning = analyze_source("SELECT * FROM t", &params(), &config);
        let info = analyze_source("SELECT a FROM t WHERE a = 1 OR b = 2", &params(), &config);
        let clean = analyze_source("SELECT a FROM t", &params(), &config);
        assert_eq!(critical.unwrap().exit_code, 2);
        assert_eq!(warning.unwrap().exit_code, 1);
        assert_eq!(info.unwrap().exit_code, 0);
        assert_eq!(clean.unwrap().exit_code, 0);
    }

    #[test]
    fn test_cli_disable_unknown_rule_fails() {
        let params = AnalyzeParams {
            disabled: vec!["no-such-rule".to_string()],
            ..params()
        };
        assert!(analyze_source("SELECT 1", &params, &Config::default()).is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let config = Config::default();
        let params = AnalyzeParams {
            max_depth: Some(8),
            strict: true,
            ..params()
        };
        let options = build_options(&config, &params);
        assert_eq!(options.max_depth, 8);
        assert!(options.strict);
        assert!(!options.deduplicate);
    }

    #[test]
    fn test_config_dialect_used_when_flag_absent() {
        let config = Config {
            dialect: Some(SqlDialect::MySQL),
            ..Default::default()
        };
        let outcome = analyze_source("SELECT a FROM t", &params(), &config).unwrap();
        assert_eq!(outcome.report.dialect, SqlDialect::MySQL);
    }
}
