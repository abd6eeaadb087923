mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::affordability::EvaluateArgs;
use commands::mix::{MixesArgs, SavingArgs};
use commands::rates::RatesArgs;

/// Mortgage affordability and rate-mix calculations
#[derive(Parser)]
#[command(
    name = "mmx",
    version,
    about = "Mortgage affordability and rate-mix calculations",
    long_about = "A CLI for screening residential loans with decimal precision. \
                  Screens affordability red flags, compares weighted-rate mixes \
                  across the fixed, variable and prime tracks, and quantifies the \
                  saving against a generic bank offer."
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
    /// Screen a loan for affordability red flags
    Evaluate(EvaluateArgs),
    /// Compare the three offered rate mixes for a loan
    Mixes(MixesArgs),
    /// Saving of a chosen mix against the generic bank offer
    Saving(SavingArgs),
    /// Show the current lending rates (fallback on fetch failure)
    Rates(RatesArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Minimal,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Evaluate(args) => commands::affordability::run_evaluate(args),
        Commands::Mixes(args) => commands::mix::run_mixes(args),
        Commands::Saving(args) => commands::mix::run_saving(args),
        Commands::Rates(args) => commands::rates::run_rates(args),
        Commands::Version => {
            println!("mmx {}", env!("CARGO_PKG_VERSION"));
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
