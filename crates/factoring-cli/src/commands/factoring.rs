use clap::Args;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use factoring_core::factoring::{self, InterestConvention, TransactionParameters};

use super::CommandResult;
use crate::config::CliConfig;
use crate::input;

/// Transaction parameters shared by every factoring-based command
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct TransactionArgs {
    /// Cash advanced to the client (e.g. 120000)
    #[arg(long)]
    pub advance_amount: Option<Decimal>,

    /// Fraction of the receivable advanced, in (0, 1] (e.g. 0.8 for 80%)
    #[arg(long)]
    pub advance_rate: Option<Decimal>,

    /// Service fee as a fraction of the receivable (e.g. 0.02 for 2%)
    #[arg(long)]
    pub service_fee_rate: Option<Decimal>,

    /// Nominal annual discount rate (e.g. 0.12 for 12%)
    #[arg(long, alias = "discount-rate-annual")]
    pub discount_rate: Option<Decimal>,

    /// Factoring tenor in months
    #[arg(long, default_value = "3")]
    pub tenor_months: u32,

    /// Interest convention: simple-annual or day-count (default from config)
    #[arg(long)]
    pub convention: Option<InterestConvention>,

    /// Path to JSON input file with transaction parameters (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

impl TransactionArgs {
    fn has_flags(&self) -> bool {
        self.advance_amount.is_some()
            || self.advance_rate.is_some()
            || self.service_fee_rate.is_some()
            || self.discount_rate.is_some()
    }

    fn from_flags(&self, config: &CliConfig) -> Result<TransactionParameters, Box<dyn std::error::Error>> {
        Ok(TransactionParameters::new(
            self.advance_amount
                .ok_or("--advance-amount is required (or provide --input)")?,
            self.advance_rate
                .ok_or("--advance-rate is required (or provide --input)")?,
            self.service_fee_rate
                .ok_or("--service-fee-rate is required (or provide --input)")?,
            self.discount_rate
                .ok_or("--discount-rate is required (or provide --input)")?,
            self.tenor_months,
        )
        .with_convention(config.interest_convention))
    }
}

/// Transaction parameters as read from `--input` or stdin. A missing
/// `interest_convention` falls back to the config default.
#[derive(Debug, Deserialize)]
struct TransactionInput {
    advance_amount: Decimal,
    advance_rate: Decimal,
    service_fee_rate: Decimal,
    discount_rate_annual: Decimal,
    tenor_months: u32,
    #[serde(default)]
    interest_convention: Option<InterestConvention>,
}

impl TransactionInput {
    fn into_params(self, default_convention: InterestConvention) -> TransactionParameters {
        TransactionParameters::new(
            self.advance_amount,
            self.advance_rate,
            self.service_fee_rate,
            self.discount_rate_annual,
            self.tenor_months,
        )
        .with_convention(self.interest_convention.unwrap_or(default_convention))
    }
}

/// Build transaction parameters from an input file, flags, or stdin, in
/// that order. `--convention` overrides whatever the source says.
pub fn resolve_params(
    args: &TransactionArgs,
    config: &CliConfig,
) -> Result<TransactionParameters, Box<dyn std::error::Error>> {
    let params = if args.input.is_none() && args.has_flags() {
        args.from_flags(config)?
    } else {
        input::load::<TransactionInput>(args.input.as_deref())?
            .ok_or(
                "transaction flags (--advance-amount, --advance-rate, ...), --input <file.json> \
                 or stdin required",
            )?
            .into_params(config.interest_convention)
    };

    let params = match args.convention {
        Some(convention) => params.with_convention(convention),
        None => params,
    };
    info!(
        advance_amount = %params.advance_amount,
        advance_rate = %params.advance_rate,
        tenor_months = params.tenor_months,
        convention = ?params.interest_convention,
        "transaction parameters resolved"
    );
    Ok(params)
}

/// Arguments for the factoring cost calculation
#[derive(Args)]
pub struct CostArgs {
    #[command(flatten)]
    pub transaction: TransactionArgs,

    /// Output the ordered label/value metric list instead of raw fields
    #[arg(long, conflicts_with = "breakdown")]
    pub labelled: bool,

    /// Output the receivable composition (net cash, total cost, reserve)
    #[arg(long)]
    pub breakdown: bool,
}

pub fn run_cost(args: CostArgs, config: &CliConfig) -> CommandResult {
    let params = resolve_params(&args.transaction, config)?;
    let output = factoring::analyze_factoring(&params)?;

    if !args.labelled && !args.breakdown {
        return Ok(serde_json::to_value(output)?);
    }

    let rows = if args.labelled {
        output.result.metrics()
    } else {
        output.result.composition()
    };
    Ok(json!({
        "results": rows,
        "methodology": output.methodology,
        "warnings": output.warnings,
    }))
}
