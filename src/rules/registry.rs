use std::sync::Arc;

use indexmap::IndexMap;

use super::{
    DisjunctivePredicateRule, LeadingWildcardLikeRule, ProjectionStarRule, Rule, RuleInfo,
    Severity
};
use crate::{
    config::RulesConfig,
    error::{AppResult, duplicate_rule_error, unknown_rule_error}
};

#[derive(Clone)]
struct Entry {
    rule:     Arc<dyn Rule>,
    enabled:  bool,
    severity: Option<Severity>
}

/// Ordered collection of rules with per-rule configuration.
///
/// Insertion order is evaluation order, and the tie-break order for findings
/// of equal severity and location. Ids are matched case-insensitively.
///
/// The registry is configuration, not execution state: an
/// [`Analyzer`](crate::engine::Analyzer) only reads it. To reconfigure while
/// analyses are running, clone it, change the clone and swap it in.
///
/// # Example
///
/// ```
/// use sql_lint::rules::{RuleRegistry, Severity};
///
/// let mut registry = RuleRegistry::with_defaults();
/// registry.disable("or-condition").unwrap();
/// registry
///     .set_severity("projection-star", Some(Severity::Critical))
///     .unwrap();
///
/// assert!(!registry.is_enabled("or-condition"));
/// assert_eq!(registry.enabled().count(), 2);
/// ```
#[derive(Clone, Default)]
pub struct RuleRegistry {
    entries: IndexMap<&'static str, Entry>
}

/// An enabled rule together with its severity override
#[derive(Clone, Copy)]
pub struct EnabledRule<'a> {
    pub rule:     &'a dyn Rule,
    pub severity: Option<Severity>
}

/// Registry entry state, for listing
#[derive(Debug, Clone)]
pub struct RuleStatus {
    pub info:     RuleInfo,
    pub enabled:  bool,
    pub severity: Severity
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.entries.keys()).finish()
    }
}

impl RuleRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in rules, all enabled
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        let defaults: [Arc<dyn Rule>; 3] = [
            Arc::new(ProjectionStarRule),
            Arc::new(DisjunctivePredicateRule),
            Arc::new(LeadingWildcardLikeRule)
        ];
        for rule in defaults {
            registry.insert(rule);
        }
        registry
    }

    /// Built-in rules with disabled ids and severity overrides applied
    ///
    /// # Notes
    ///
    /// - Unknown rule ids and unparsable severities are logged and skipped
    pub fn with_config(config: &RulesConfig) -> Self {
        let mut registry = Self::with_defaults();
        for id in &config.disabled {
            if registry.disable(id).is_err() {
                tracing::warn!(rule = %id, "ignoring unknown rule in disabled list");
            }
        }
        for (id, sev_str) in &config.severity {
            let Some(severity) = Severity::parse(sev_str) else {
                tracing::warn!(rule = %id, severity = %sev_str, "ignoring invalid severity");
                continue;
            };
            if registry.set_severity(id, Some(severity)).is_err() {
                tracing::warn!(rule = %id, "ignoring severity for unknown rule");
            }
        }
        registry
    }

    /// Append a rule, enabled, at the end of the evaluation order.
    ///
    /// # Errors
    ///
    /// Fails when a rule with the same id is already registered.
    pub fn register<R: Rule + 'static>(&mut self, rule: R) -> AppResult<()> {
        let id = rule.info().id;
        if self.position(id).is_some() {
            return Err(duplicate_rule_error(id));
        }
        self.insert(Arc::new(rule));
        Ok(())
    }

    pub fn enable(&mut self, id: &str) -> AppResult<()> {
        self.entry_mut(id)?.enabled = true;
        Ok(())
    }

    pub fn disable(&mut self, id: &str) -> AppResult<()> {
        self.entry_mut(id)?.enabled = false;
        Ok(())
    }

    /// Override the severity of a rule's findings; `None` restores the default.
    pub fn set_severity(&mut self, id: &str, severity: Option<Severity>) -> AppResult<()> {
        self.entry_mut(id)?.severity = severity;
        Ok(())
    }

    pub fn is_enabled(&self, id: &str) -> bool {
        self.position(id)
            .and_then(|idx| self.entries.get_index(idx))
            .is_some_and(|(_, entry)| entry.enabled)
    }

    pub fn severity_override(&self, id: &str) -> Option<Severity> {
        self.position(id)
            .and_then(|idx| self.entries.get_index(idx))
            .and_then(|(_, entry)| entry.severity)
    }

    /// Enabled rules in evaluation order
    pub fn enabled(&self) -> impl Iterator<Item = EnabledRule<'_>> {
        self.entries
            .values()
            .filter(|entry| entry.enabled)
            .map(|entry| EnabledRule {
                rule:     entry.rule.as_ref(),
                severity: entry.severity
            })
    }

    /// Every registered rule with its state, in evaluation order
    pub fn statuses(&self) -> Vec<RuleStatus> {
        self.entries
            .values()
            .map(|entry| {
                let info = entry.rule.info();
                RuleStatus {
                    severity: entry.severity.unwrap_or(info.severity),
                    enabled: entry.enabled,
                    info
                }
            })
            .collect()
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, rule: Arc<dyn Rule>) {
        let id = rule.info().id;
        self.entries.insert(
            id,
            Entry {
                rule,
                enabled: true,
                severity: None
            }
        );
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.entries
            .keys()
            .position(|key| key.eq_ignore_ascii_case(id.trim()))
    }

    fn entry_mut(&mut self, id: &str) -> AppResult<&mut Entry> {
        let idx = self.position(id).ok_or_else(|| unknown_rule_error(id))?;
        self.entries
            .get_index_mut(idx)
            .map(|(_, entry)| entry)
            .ok_or_else(|| unknown_rule_error(id))
    }
}
