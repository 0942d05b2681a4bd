//! Configuration loading and management.
//!
//! Configuration is loaded from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. `.sql-lint.toml` in current directory
//! 4. `~/.config/sql-lint/config.toml`
//! 5. Default values
//!
//! # Configuration File Format
//!
//! ```toml
//! dialect = "postgresql"
//!
//! [analysis]
//! max_depth = 512
//! deduplicate = false
//! strict = false
//!
//! [rules]
//! disabled = ["or-condition"]
//!
//! [rules.severity]
//! projection-star = "info"
//!
//! [logging]
//! level = "warn"
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Description |
//! |----------|-------------|
//! | `SQL_LINT_DIALECT` | Default SQL dialect |
//! | `SQL_LINT_LOG` | Log filter (`tracing` env-filter syntax) |

use std::{
    collections::HashMap,
    env, fs,
    path::{Path, PathBuf}
};

use serde::Deserialize;

use crate::{
    ast::DEFAULT_MAX_DEPTH,
    dialect::SqlDialect,
    error::{AppResult, config_error}
};

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Dialect used when none is given on the command line
    #[serde(default)]
    pub dialect:  Option<SqlDialect>,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub rules:    RulesConfig,
    #[serde(default)]
    pub logging:  LoggingConfig
}

/// Analyzer engine settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Maximum expression nesting before a statement is abandoned
    pub max_depth:   usize,
    /// Drop findings identical in every field
    pub deduplicate: bool,
    /// Report unmapped constructs instead of degrading them
    pub strict:      bool
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_depth:   DEFAULT_MAX_DEPTH,
            deduplicate: false,
            strict:      false
        }
    }
}

/// Rules configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RulesConfig {
    /// Disabled rule IDs
    #[serde(default)]
    pub disabled: Vec<String>,
    /// Severity overrides (rule_id -> severity)
    #[serde(default)]
    pub severity: HashMap<String, String>
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when `SQL_LINT_LOG` is unset
    pub level: String
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("warn")
        }
    }
}

impl Config {
    /// Load configuration from file and environment
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables
    /// 2. Config file in current directory (.sql-lint.toml)
    /// 3. Config file in home directory (~/.config/sql-lint/config.toml)
    /// 4. Default values
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(home) = env::var_os("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("sql-lint")
                .join("config.toml");
            if home_config.exists() {
                config = Self::from_file(&home_config)?;
            }
        }

        // Current directory config replaces the home one entirely
        let local_config = PathBuf::from(".sql-lint.toml");
        if local_config.exists() {
            config = Self::from_file(&local_config)?;
        }

        config.apply_env()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        toml::from_str(content).map_err(|e| config_error(format!("Invalid config file: {}", e)))
    }

    /// Read and parse a TOML configuration file
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| config_error(format!("Failed to read config file: {}", e)))?;
        Self::from_toml_str(&content)
    }

    fn apply_env(&mut self) -> AppResult<()> {
        if let Ok(dialect) = env::var("SQL_LINT_DIALECT") {
            self.dialect = Some(dialect.parse()?);
        }
        if let Ok(level) = env::var("SQL_LINT_LOG") {
            self.logging.level = level;
        }
        Ok(())
    }
}
