// SPDX-FileCopyrightText: 2025 RAprogramm
// SPDX-License-Identifier: MIT

use std::io::Write;

use sql_lint::{
    config::{Config, RulesConfig},
    dialect::SqlDialect,
    engine::AnalyzerOptions
};
use tempfile::NamedTempFile;

#[test]
fn test_default_config() {
    let config = Config::default();

    assert!(config.dialect.is_none());
    assert_eq!(config.analysis.max_depth, 512);
    assert!(!config.analysis.deduplicate);
    assert!(!config.analysis.strict);
    assert_eq!(config.logging.level, "warn");
    assert!(config.rules.disabled.is_empty());
}

#[test]
fn test_default_rules_config() {
    let config = RulesConfig::default();

    assert!(config.disabled.is_empty());
    assert!(config.severity.is_empty());
}

#[test]
fn test_parse_full_config() {
    let config = Config::from_toml_str(
        r#"
dialect = "postgresql"

[analysis]
max_depth = 128
deduplicate = true

[rules]
disabled = ["or-condition"]

[rules.severity]
projection-star = "critical"

[logging]
level = "debug"
"#
    )
    .unwrap();

    assert_eq!(config.dialect, Some(SqlDialect::PostgreSQL));
    assert_eq!(config.analysis.max_depth, 128);
    assert!(config.analysis.deduplicate);
    assert!(!config.analysis.strict);
    assert_eq!(config.rules.disabled, ["or-condition"]);
    assert_eq!(
        config.rules.severity.get("projection-star").map(String::as_str),
        Some("critical")
    );
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_partial_config_keeps_defaults() {
    let config = Config::from_toml_str("[analysis]\nstrict = true\n").unwrap();
    assert!(config.analysis.strict);
    assert_eq!(config.analysis.max_depth, 512);
    assert!(config.dialect.is_none());
}

#[test]
fn test_invalid_config() {
    assert!(Config::from_toml_str("[analysis\nmax_depth = 1").is_err());
    assert!(Config::from_toml_str("dialect = \"oracle\"").is_err());
}

#[test]
fn test_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "dialect = \"mysql\"").unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.dialect, Some(SqlDialect::MySQL));
}

#[test]
fn test_missing_file() {
    assert!(Config::from_file(std::path::Path::new("/nonexistent/sql-lint.toml")).is_err());
}

#[test]
fn test_analyzer_options_from_config() {
    let config = Config::from_toml_str("[analysis]\nmax_depth = 32\nstrict = true\n").unwrap();
    let options = AnalyzerOptions::from(&config.analysis);
    assert_eq!(options.max_depth, 32);
    assert!(options.strict);
    assert!(!options.deduplicate);
}
