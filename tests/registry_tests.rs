// SPDX-FileCopyrightText: 2025 RAprogramm
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use sql_lint::{
    ast::{Projection, Statement},
    config::RulesConfig,
    dialect::SqlDialect,
    engine::analyze,
    error::AnalysisError,
    rules::{Finding, Rule, RuleContext, RuleInfo, RuleRegistry, Severity}
};

struct NoProjection;

impl Rule for NoProjection {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:             "no-projection",
            name:           "Statement without select list",
            severity:       Severity::Info,
            message:        "Statement has no projection",
            recommendation: "Nothing to do."
        }
    }

    fn evaluate(
        &self,
        statement: &Statement,
        _ctx: &RuleContext
    ) -> Result<Vec<Finding>, AnalysisError> {
        match &statement.projection {
            Projection::Columns(cols) if cols.is_empty() => Ok(vec![self.info().finding(statement)]),
            _ => Ok(vec![])
        }
    }
}

#[test]
fn test_default_order() {
    let registry = RuleRegistry::with_defaults();
    let ids: Vec<_> = registry.ids().collect();
    assert_eq!(ids, ["projection-star", "or-condition", "leading-wildcard"]);
}

#[test]
fn test_register_custom_rule() {
    let mut registry = RuleRegistry::with_defaults();
    registry.register(NoProjection).unwrap();
    assert_eq!(registry.len(), 4);

    let report = analyze("DELETE FROM t WHERE a = 1", SqlDialect::Generic, &registry);
    let ids: Vec<_> = report.findings.iter().map(|f| f.rule_id).collect();
    assert_eq!(ids, ["no-projection"]);
}

#[test]
fn test_duplicate_registration_rejected() {
    let mut registry = RuleRegistry::new();
    registry.register(NoProjection).unwrap();
    assert!(registry.register(NoProjection).is_err());
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_unknown_id_errors() {
    let mut registry = RuleRegistry::with_defaults();
    assert!(registry.disable("missing").is_err());
    assert!(registry.enable("missing").is_err());
    assert!(registry.set_severity("missing", Some(Severity::Info)).is_err());
}

#[test]
fn test_disable_is_case_insensitive() {
    let mut registry = RuleRegistry::with_defaults();
    registry.disable("OR-Condition").unwrap();
    assert!(!registry.is_enabled("or-condition"));

    let report = analyze("SELECT a FROM t WHERE a = 1 OR b = 2", SqlDialect::Generic, &registry);
    assert!(report.is_clean());

    registry.enable("or-condition").unwrap();
    let report = analyze("SELECT a FROM t WHERE a = 1 OR b = 2", SqlDialect::Generic, &registry);
    assert_eq!(report.findings.len(), 1);
}

#[test]
fn test_severity_override_and_reset() {
    let mut registry = RuleRegistry::with_defaults();
    registry
        .set_severity("projection-star", Some(Severity::Info))
        .unwrap();
    let report = analyze("SELECT * FROM t", SqlDialect::Generic, &registry);
    assert_eq!(report.findings[0].severity, Severity::Info);

    registry.set_severity("projection-star", None).unwrap();
    let report = analyze("SELECT * FROM t", SqlDialect::Generic, &registry);
    assert_eq!(report.findings[0].severity, Severity::Warning);
}

#[test]
fn test_with_config() {
    let config = RulesConfig {
        disabled: vec!["leading-wildcard".to_string(), "unknown-rule".to_string()],
        severity: HashMap::from([
            ("or-condition".to_string(), "error".to_string()),
            ("projection-star".to_string(), "bogus".to_string())
        ])
    };
    let registry = RuleRegistry::with_config(&config);

    assert!(!registry.is_enabled("leading-wildcard"));
    assert_eq!(
        registry.severity_override("or-condition"),
        Some(Severity::Critical)
    );
    assert_eq!(registry.severity_override("projection-star"), None);
}

#[test]
fn test_statuses_reflect_state() {
    let mut registry = RuleRegistry::with_defaults();
    registry.disable("or-condition").unwrap();
    registry
        .set_severity("leading-wildcard", Some(Severity::Warning))
        .unwrap();

    let statuses = registry.statuses();
    assert_eq!(statuses.len(), 3);
    assert!(statuses[0].enabled);
    assert!(!statuses[1].enabled);
    assert_eq!(statuses[2].severity, Severity::Warning);
    assert_eq!(statuses[2].info.severity, Severity::Critical);
}

#[test]
fn test_empty_registry_reports_nothing() {
    let registry = RuleRegistry::new();
    assert!(registry.is_empty());
    let report = analyze("SELECT * FROM t WHERE a LIKE '%x'", SqlDialect::Generic, &registry);
    assert!(report.is_clean());
    assert_eq!(report.statement_count, 1);
}
