use std::process;

use clap::Parser;
use sql_lint::{
    app::{AnalyzeParams, list_rules, run_analyze},
    cli::{Cli, Commands},
    config::Config,
    error::AppResult
};
use tracing_subscriber::EnvFilter;

fn main() {
    match run() {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn run() -> AppResult<i32> {
    let cli = Cli::parse();
    let config = Config::load()?;
    init_tracing(&config.logging.level);

    match cli.command {
        Commands::Analyze {
            queries,
            dialect,
            output_format,
            disabled,
            max_depth,
            dedup,
            strict,
            no_color
        } => {
            let params = AnalyzeParams {
                queries_path: queries.display().to_string(),
                dialect,
                output_format: Some(output_format),
                disabled,
                max_depth,
                dedup,
                strict,
                no_color
            };
            let outcome = run_analyze(&params, &config)?;
            println!("{}", outcome.output);
            Ok(outcome.exit_code)
        }
        Commands::Rules {
            output_format
        } => {
            println!("{}", list_rules(output_format, &config)?);
            Ok(0)
        }
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
