use clap::Args;
use rust_decimal::Decimal;
use serde_json::json;

use factoring_core::lc_comparison::{self, LcComparisonInput, LcRates};

use super::factoring::{resolve_params, TransactionArgs};
use super::CommandResult;
use crate::config::CliConfig;
use crate::input;

/// L/C rate overrides; anything unset comes from the config file
#[derive(Args)]
pub struct LcRateArgs {
    /// L/C issuance fee, percent of the receivable (e.g. 0.15 for 0.15%)
    #[arg(long)]
    pub lc_fee_rate_pct: Option<Decimal>,

    /// Cash margin, percent of the receivable (e.g. 20)
    #[arg(long)]
    pub margin_rate_pct: Option<Decimal>,

    /// Annual cost of capital on the margin, percent (e.g. 8)
    #[arg(long)]
    pub cost_of_capital_pct: Option<Decimal>,
}

impl LcRateArgs {
    fn resolve(&self, defaults: &LcRates) -> LcRates {
        LcRates {
            lc_fee_rate_pct: self.lc_fee_rate_pct.unwrap_or(defaults.lc_fee_rate_pct),
            margin_rate_pct: self.margin_rate_pct.unwrap_or(defaults.margin_rate_pct),
            cost_of_capital_annual_pct: self
                .cost_of_capital_pct
                .unwrap_or(defaults.cost_of_capital_annual_pct),
        }
    }
}

/// Arguments for stand-alone letter of credit pricing
#[derive(Args)]
pub struct LcArgs {
    /// Receivable covered by the L/C
    #[arg(long)]
    pub total_receivable: Option<Decimal>,

    /// Tenor in months the margin stays locked
    #[arg(long)]
    pub tenor_months: Option<u32>,

    #[command(flatten)]
    pub rates: LcRateArgs,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the factoring vs. letter of credit comparison
#[derive(Args)]
pub struct CompareArgs {
    #[command(flatten)]
    pub transaction: TransactionArgs,

    #[command(flatten)]
    pub rates: LcRateArgs,
}

pub fn run_lc(args: LcArgs, config: &CliConfig) -> CommandResult {
    let lc_input: LcComparisonInput = match args.total_receivable {
        Some(total_receivable) if args.input.is_none() => LcComparisonInput::from_rates(
            total_receivable,
            &args.rates.resolve(&config.letter_of_credit),
            args.tenor_months
                .ok_or("--tenor-months is required (or provide --input)")?,
        ),
        _ => input::load(args.input.as_deref())?
            .ok_or("--total-receivable and --tenor-months, --input <file.json> or stdin required")?,
    };

    let result = lc_comparison::compute_lc_cost(&lc_input);
    Ok(json!({
        "result": result,
        "assumptions": lc_input,
    }))
}

pub fn run_compare(args: CompareArgs, config: &CliConfig) -> CommandResult {
    let params = resolve_params(&args.transaction, config)?;
    let rates = args.rates.resolve(&config.letter_of_credit);
    let result = lc_comparison::compare_instruments(&params, &rates)?;
    Ok(serde_json::to_value(result)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn no_rate_overrides() -> LcRateArgs {
        LcRateArgs {
            lc_fee_rate_pct: None,
            margin_rate_pct: None,
            cost_of_capital_pct: None,
        }
    }

    #[test]
    fn test_rates_fall_back_to_config() {
        let rates = LcRateArgs {
            margin_rate_pct: Some(dec!(10)),
            ..no_rate_overrides()
        }
        .resolve(&LcRates::default());
        assert_eq!(rates.margin_rate_pct, dec!(10));
        assert_eq!(rates.lc_fee_rate_pct, dec!(0.15));
        assert_eq!(rates.cost_of_capital_annual_pct, dec!(8));
    }

    #[test]
    fn test_lc_from_flags() {
        let args = LcArgs {
            total_receivable: Some(dec!(150000)),
            tenor_months: Some(12),
            rates: no_rate_overrides(),
            input: None,
        };
        let value = run_lc(args, &CliConfig::default()).unwrap();
        let total: Decimal = value["result"]["total_lc_cost"]
            .as_str()
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(total, dec!(2625));
    }

    #[test]
    fn test_lc_requires_tenor() {
        let args = LcArgs {
            total_receivable: Some(dec!(150000)),
            tenor_months: None,
            rates: no_rate_overrides(),
            input: None,
        };
        assert!(run_lc(args, &CliConfig::default()).is_err());
    }
}
