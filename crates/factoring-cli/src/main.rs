mod commands;
mod config;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use std::process;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::factoring::CostArgs;
use commands::letter_of_credit::{CompareArgs, LcArgs};
use commands::sensitivity::{GridArgs, SweepRateArgs, SweepTenorArgs};
use config::CliConfig;

/// Invoice-factoring cost calculator
#[derive(Parser)]
#[command(
    name = "factor",
    version,
    about = "Invoice-factoring cost calculator",
    long_about = "Computes the economics of an invoice-factoring transaction with decimal \
                  precision: receivable, fees, discount interest, net cash and cost ratios. \
                  Compares against a letter of credit and sweeps tenor and rate scenarios."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Factoring cost: receivable, fees, interest, net cash and ratios
    Cost(CostArgs),
    /// Letter of credit cost for a given receivable
    Lc(LcArgs),
    /// Factoring vs. letter of credit on the same receivable and tenor
    Compare(CompareArgs),
    /// Sweep the factoring tenor, other parameters fixed
    SweepTenor(SweepTenorArgs),
    /// Sweep the annual discount rate, other parameters fixed
    SweepRate(SweepRateArgs),
    /// Two-way tenor x discount-rate sensitivity grid
    Grid(GridArgs),
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

fn init_tracing(verbose: bool, config: &CliConfig) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level))
    };

    // stdout carries the command output
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();

    let config = match CliConfig::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };
    init_tracing(cli.verbose, &config);
    debug!(path = %cli.config.display(), ?config, "configuration loaded");

    let result = match cli.command {
        Commands::Cost(args) => commands::factoring::run_cost(args, &config),
        Commands::Lc(args) => commands::letter_of_credit::run_lc(args, &config),
        Commands::Compare(args) => commands::letter_of_credit::run_compare(args, &config),
        Commands::SweepTenor(args) => commands::sensitivity::run_sweep_tenor(args, &config),
        Commands::SweepRate(args) => commands::sensitivity::run_sweep_rate(args, &config),
        Commands::Grid(args) => commands::sensitivity::run_grid(args, &config),
        Commands::Version => {
            println!("factor {}", env!("CARGO_PKG_VERSION"));
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
