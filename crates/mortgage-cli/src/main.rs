mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::compare::CompareArgs;
use commands::mortgage::{CalculateArgs, ChartArgs, ScheduleArgs};
use commands::pmi::PmiArgs;

/// Mortgage amortization and savings calculator
#[derive(Parser)]
#[command(
    name = "mortgage",
    version,
    about = "Mortgage amortization schedules with extra payments and PMI",
    long_about = "Computes fixed-rate mortgage payments, month-by-month amortization \
                  schedules, interest and time saved by extra principal payments, \
                  and a rough PMI estimate. All amounts use decimal precision."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate payment summary, schedule and savings
    Calculate(CalculateArgs),
    /// Print the amortization schedule (monthly or yearly)
    Schedule(ScheduleArgs),
    /// Year-end balance and cumulative interest series
    Chart(ChartArgs),
    /// Estimate monthly PMI from loan amount and home price
    Pmi(PmiArgs),
    /// Compare two scenarios read from a JSON file
    Compare(CompareArgs),
    /// List the available scenario presets
    Presets,
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Calculate(args) => commands::mortgage::run_calculate(args),
        Commands::Schedule(args) => commands::mortgage::run_schedule(args),
        Commands::Chart(args) => commands::mortgage::run_chart(args),
        Commands::Pmi(args) => commands::pmi::run_pmi(args),
        Commands::Compare(args) => commands::compare::run_compare(args),
        Commands::Presets => commands::mortgage::run_presets(),
        Commands::Version => {
            println!("mortgage {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
