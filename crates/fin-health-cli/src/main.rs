mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::prelude::*;

use commands::analyze::{AnalyzeArgs, RecordArgs};
use commands::glossary::{FieldsArgs, GlossaryArgs};

/// Financial health assessment from a company's statements
#[derive(Parser)]
#[command(
    name = "finhealth",
    version,
    about = "Financial health assessment from a company's statements",
    long_about = "Derives profitability, liquidity, solvency, efficiency and cash-flow \
                  ratios from one period of financial statements, scores six rule-based \
                  assessment modules and prints the result as JSON, tables, CSV or a \
                  plain-text report."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log debug detail to stderr (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute ratios and run all six assessment modules
    Analyze(AnalyzeArgs),
    /// Compute the derived ratios only
    Ratios(RecordArgs),
    /// Define a field or ratio, or list every term
    Glossary(GlossaryArgs),
    /// List the recognised input fields
    Fields(FieldsArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
    /// Plain-text report (analyze only; other commands print JSON)
    Report,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time(),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let as_report = cli.output == OutputFormat::Report;
    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Analyze(args) => commands::analyze::run_analyze(args, as_report),
        Commands::Ratios(args) => commands::analyze::run_ratios(args),
        Commands::Glossary(args) => commands::glossary::run_glossary(args),
        Commands::Fields(args) => commands::glossary::run_fields(args),
        Commands::Version => {
            println!("finhealth {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
