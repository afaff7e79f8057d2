use clap::Args;
use rust_decimal::Decimal;
use serde_json::json;

use factoring_core::factoring::FactoringMetric;
use factoring_core::sensitivity;

use super::factoring::{resolve_params, TransactionArgs};
use super::CommandResult;
use crate::config::CliConfig;

/// Arguments for a one-way tenor sweep
#[derive(Args)]
pub struct SweepTenorArgs {
    #[command(flatten)]
    pub transaction: TransactionArgs,

    /// Comma-separated tenors in months (default from config: 3,6,9,12)
    #[arg(long, value_delimiter = ',')]
    pub tenors: Vec<u32>,

    /// Metric to report: net-cash, total-cost, interest-cost, service-fee, annualized-cost
    #[arg(long, default_value = "net-cash")]
    pub metric: FactoringMetric,
}

/// Arguments for a one-way discount-rate sweep
#[derive(Args)]
pub struct SweepRateArgs {
    #[command(flatten)]
    pub transaction: TransactionArgs,

    /// Comma-separated annual discount rates (e.g. 0.08,0.12,0.18)
    #[arg(long, value_delimiter = ',')]
    pub rates: Vec<Decimal>,

    /// Metric to report
    #[arg(long, default_value = "net-cash")]
    pub metric: FactoringMetric,
}

/// Arguments for the two-way tenor x rate grid
#[derive(Args)]
pub struct GridArgs {
    #[command(flatten)]
    pub transaction: TransactionArgs,

    /// Comma-separated tenors in months (grid rows)
    #[arg(long, value_delimiter = ',')]
    pub tenors: Vec<u32>,

    /// Comma-separated annual discount rates (grid columns)
    #[arg(long, value_delimiter = ',')]
    pub rates: Vec<Decimal>,

    /// Metric in each cell
    #[arg(long, default_value = "net-cash")]
    pub metric: FactoringMetric,
}

fn or_default<T: Clone>(given: Vec<T>, fallback: &[T]) -> Vec<T> {
    if given.is_empty() {
        fallback.to_vec()
    } else {
        given
    }
}

pub fn run_sweep_tenor(args: SweepTenorArgs, config: &CliConfig) -> CommandResult {
    let params = resolve_params(&args.transaction, config)?;
    let tenors = or_default(args.tenors, &config.scenarios.tenors);
    let points = sensitivity::sweep_metric_by_tenor(&params, &tenors, args.metric)?;
    Ok(json!({
        "metric": args.metric.label(),
        "results": points,
    }))
}

pub fn run_sweep_rate(args: SweepRateArgs, config: &CliConfig) -> CommandResult {
    let params = resolve_params(&args.transaction, config)?;
    let rates = or_default(args.rates, &config.scenarios.rates);
    let points = sensitivity::sweep_metric_by_interest_rate(&params, &rates, args.metric)?;
    Ok(json!({
        "metric": args.metric.label(),
        "results": points,
    }))
}

pub fn run_grid(args: GridArgs, config: &CliConfig) -> CommandResult {
    let params = resolve_params(&args.transaction, config)?;
    let tenors = or_default(args.tenors, &config.scenarios.tenors);
    let rates = or_default(args.rates, &config.scenarios.rates);
    let result = sensitivity::tenor_rate_grid(&params, &tenors, &rates, args.metric)?;
    Ok(serde_json::to_value(result)?)
}
