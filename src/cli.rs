use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// SQL Lint - Static analysis of SQL statements
#[derive(Parser, Debug)]
#[command(name = "sql-lint")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze SQL statements
    Analyze {
        /// Path to SQL file (use - for stdin)
        #[arg(short, long)]
        queries: PathBuf,

        /// SQL dialect for parsing
        #[arg(long, value_enum)]
        dialect: Option<Dialect>,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value = "text")]
        output_format: Format,

        /// Disable a rule by id (repeatable)
        #[arg(long = "disable", value_name = "RULE")]
        disabled: Vec<String>,

        /// Maximum expression nesting depth
        #[arg(long)]
        max_depth: Option<usize>,

        /// Drop identical findings
        #[arg(long)]
        dedup: bool,

        /// Report unsupported constructs instead of skipping them
        #[arg(long)]
        strict: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool
    },
    /// List registered rules
    Rules {
        /// Output format
        #[arg(short = 'f', long, value_enum, default_value = "text")]
        output_format: Format
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Dialect {
    Generic,
    Mysql,
    Mariadb,
    Postgresql,
    Transactsql,
    Bigquery,
    Sqlite,
    Snowflake,
    Redshift,
    Hive,
    Clickhouse
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Format {
    Text,
    Json,
    Yaml
}
