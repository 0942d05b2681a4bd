//! Report rendering for the command-line shell.
//!
//! The text format doubles as the plain-text report export; JSON and YAML
//! serialize the [`Report`] as-is.

use colored::Colorize;
use serde::Serialize;

use crate::{
    error::{AppResult, render_error},
    report::Report,
    rules::{RuleStatus, Severity}
};

/// Output format for results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml
}

/// Output options
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format:  OutputFormat,
    pub colored: bool
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            format:  OutputFormat::Text,
            colored: true
        }
    }
}

/// Rule listing entry for serialization
#[derive(Debug, Serialize)]
struct RuleEntry<'a> {
    id:               &'a str,
    name:             &'a str,
    default_severity: Severity,
    severity:         Severity,
    enabled:          bool
}

/// Format an analysis report
pub fn format_report(report: &Report, opts: &OutputOptions) -> AppResult<String> {
    match opts.format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(report).map_err(|e| render_error(e.to_string()))
        }
        OutputFormat::Yaml => serde_yaml::to_string(report).map_err(|e| render_error(e.to_string())),
        OutputFormat::Text => Ok(format_text_report(report, opts))
    }
}

/// Format the registered rules with their effective state
pub fn format_rules(statuses: &[RuleStatus], opts: &OutputOptions) -> AppResult<String> {
    let entries: Vec<RuleEntry<'_>> = statuses
        .iter()
        .map(|s| RuleEntry {
            id:               s.info.id,
            name:             s.info.name,
            default_severity: s.info.severity,
            severity:         s.severity,
            enabled:          s.enabled
        })
        .collect();
    match opts.format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(&entries).map_err(|e| render_error(e.to_string()))
        }
        OutputFormat::Yaml => {
            serde_yaml::to_string(&entries).map_err(|e| render_error(e.to_string()))
        }
        OutputFormat::Text => {
            let mut output = String::new();
            for entry in &entries {
                let state = if entry.enabled { "enabled" } else { "disabled" };
                output.push_str(&format!(
                    "{:<18} {:<9} {:<9} {}\n",
                    entry.id,
                    entry.severity.to_string(),
                    state,
                    entry.name
                ));
            }
            Ok(output)
        }
    }
}

fn format_text_report(report: &Report, opts: &OutputOptions) -> String {
    let mut output = String::new();
    let header = "=== SQL Analysis Report ===";
    if opts.colored {
        output.push_str(&header.bold().to_string());
    } else {
        output.push_str(header);
    }
    output.push_str(&format!(
        "\nDialect: {} | Statements: {}\n\n",
        report.dialect, report.statement_count
    ));

    if report.is_clean() {
        let msg = "No issues found.";
        if opts.colored {
            output.push_str(&msg.green().to_string());
        } else {
            output.push_str(msg);
        }
        output.push('\n');
        return output;
    }

    for finding in &report.findings {
        let label = format!("[{}]", finding.severity);
        let label = if opts.colored {
            match finding.severity {
                Severity::Critical => label.red().bold().to_string(),
                Severity::Warning => label.yellow().bold().to_string(),
                Severity::Info => label.blue().to_string()
            }
        } else {
            label
        };
        let location = finding
            .location
            .map(|line| format!(" (line {})", line))
            .unwrap_or_default();
        output.push_str(&format!(
            "{} {}{}: {}\n",
            label, finding.rule_id, location, finding.message
        ));
        output.push_str(&format!("    -> {}\n", finding.recommendation));
    }

    output.push_str(&format!(
        "\nSummary: {} critical, {} warning(s), {} info\n",
        report.critical_count(),
        report.warning_count(),
        report.info_count()
    ));
    output
}
