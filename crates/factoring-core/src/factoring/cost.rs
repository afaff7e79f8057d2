//! Factoring cost engine.
//!
//! Maps a [`TransactionParameters`] value to the full set of factoring
//! economics: receivable, service fee, discount interest, total cost, net cash
//! received, reserve and the four efficiency ratios.
//!
//! Ratios use a 30/360 basis (standard in trade finance) whichever interest
//! convention accrued the discount interest.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, warn};

use super::params::{
    tenor_days, tenor_days_exact, InterestConvention, TransactionParameters, DAYS_IN_YEAR,
};
use crate::error::FactoringError;
use crate::types::{with_metadata, ComputationOutput, Metric, Money, Rate};
use crate::FactoringEngineResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const HUNDRED: Decimal = dec!(100);
/// Customary advance-rate band offered by factors.
const MIN_CUSTOMARY_ADVANCE_RATE: Rate = dec!(0.5);
const MAX_CUSTOMARY_ADVANCE_RATE: Rate = dec!(0.95);
const MAX_CUSTOMARY_TENOR_MONTHS: u32 = 12;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Economics of one factoring transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactoringResult {
    /// Face value of the receivable = advance / advance rate.
    pub total_receivable: Money,
    /// Cash advanced upfront.
    pub advance_amount: Money,
    /// Receivable x service fee rate.
    pub service_fee: Money,
    /// Discount interest on the advance for the tenor.
    pub interest_cost: Money,
    /// Service fee + interest cost.
    pub total_cost: Money,
    /// Advance - total cost.
    pub net_cash_received: Money,
    /// Receivable withheld until collection = receivable - advance.
    pub reserve: Money,
    /// Tenor on a 30/360 basis.
    pub tenor_days: u32,
    pub interest_convention: InterestConvention,
    pub net_profit_rate_pct: Decimal,
    pub annualized_cost_rate_pct: Decimal,
    pub interest_cost_ratio_pct: Decimal,
    pub service_fee_ratio_pct: Decimal,
}

/// Selects one figure of a [`FactoringResult`], e.g. as the output of a sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FactoringMetric {
    #[default]
    NetCashReceived,
    TotalCost,
    InterestCost,
    ServiceFee,
    AnnualizedCostRatePct,
}

impl FactoringMetric {
    pub fn value_of(self, result: &FactoringResult) -> Decimal {
        match self {
            FactoringMetric::NetCashReceived => result.net_cash_received,
            FactoringMetric::TotalCost => result.total_cost,
            FactoringMetric::InterestCost => result.interest_cost,
            FactoringMetric::ServiceFee => result.service_fee,
            FactoringMetric::AnnualizedCostRatePct => result.annualized_cost_rate_pct,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FactoringMetric::NetCashReceived => "Net Cash Received",
            FactoringMetric::TotalCost => "Total Cost",
            FactoringMetric::InterestCost => "Interest Cost",
            FactoringMetric::ServiceFee => "Service Fee",
            FactoringMetric::AnnualizedCostRatePct => "Annualized Cost Rate (%)",
        }
    }
}

impl std::fmt::Display for FactoringMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for FactoringMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "net_cash" | "net_cash_received" => Ok(FactoringMetric::NetCashReceived),
            "total_cost" => Ok(FactoringMetric::TotalCost),
            "interest" | "interest_cost" => Ok(FactoringMetric::InterestCost),
            "service_fee" => Ok(FactoringMetric::ServiceFee),
            "annualized_cost" | "annualized_cost_rate" => {
                Ok(FactoringMetric::AnnualizedCostRatePct)
            }
            _ => Err(format!(
                "Unknown metric '{s}'. Expected one of: net-cash, total-cost, interest-cost, \
                 service-fee, annualized-cost"
            )),
        }
    }
}

impl FactoringResult {
    /// Ordered label -> value mapping for tabular and chart consumers.
    pub fn metrics(&self) -> Vec<Metric> {
        vec![
            Metric::new("Total Receivable", self.total_receivable),
            Metric::new("Advance Amount", self.advance_amount),
            Metric::new("Service Fee", self.service_fee),
            Metric::new("Interest Cost", self.interest_cost),
            Metric::new("Total Cost", self.total_cost),
            Metric::new("Net Cash Received", self.net_cash_received),
            Metric::new("Reserve", self.reserve),
            Metric::new("Net Profit Rate (%)", self.net_profit_rate_pct),
            Metric::new("Annualized Cost Rate (%)", self.annualized_cost_rate_pct),
            Metric::new("Interest Cost Ratio (%)", self.interest_cost_ratio_pct),
            Metric::new("Service Fee Ratio (%)", self.service_fee_ratio_pct),
        ]
    }

    /// How the receivable splits into net cash, cost and reserve.
    pub fn composition(&self) -> Vec<Metric> {
        vec![
            Metric::new("Net Cash Received", self.net_cash_received),
            Metric::new("Total Cost", self.total_cost),
            Metric::new("Reserve", self.reserve),
        ]
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute the cost of a factoring transaction.
///
/// Fails when `advance_rate` lies outside (0, 1], or when a line item is too
/// large to represent as a Decimal. Economically odd inputs, such as costs
/// larger than the advance, still produce a result.
pub fn compute_factoring_cost(
    params: &TransactionParameters,
) -> FactoringEngineResult<FactoringResult> {
    validate_advance_rate(params.advance_rate)?;

    let advance = params.advance_amount;
    let total_receivable = advance
        .checked_div(params.advance_rate)
        .ok_or_else(|| out_of_range("advance_amount", "total receivable"))?;
    let service_fee = total_receivable
        .checked_mul(params.service_fee_rate)
        .ok_or_else(|| out_of_range("service_fee_rate", "service fee"))?;
    let interest_cost = params
        .interest_convention
        .accrue(advance, params.discount_rate_annual, params.tenor_months)
        .ok_or_else(|| out_of_range("discount_rate_annual", "interest cost"))?;

    let total_cost = service_fee
        .checked_add(interest_cost)
        .ok_or_else(|| out_of_range("advance_amount", "total cost"))?;
    let net_cash_received = advance
        .checked_sub(total_cost)
        .ok_or_else(|| out_of_range("advance_amount", "net cash received"))?;
    let reserve = total_receivable
        .checked_sub(advance)
        .ok_or_else(|| out_of_range("advance_amount", "reserve"))?;
    let days = tenor_days(params.tenor_months);

    let ratios = if total_cost > Decimal::ZERO && net_cash_received > Decimal::ZERO {
        let annualized_cost_rate_pct = if params.tenor_months > 0 {
            let year_fraction = DAYS_IN_YEAR / tenor_days_exact(params.tenor_months);
            ratio_or_zero(
                "annualized_cost_rate_pct",
                total_cost
                    .checked_div(net_cash_received)
                    .and_then(|r| r.checked_mul(year_fraction))
                    .and_then(|r| r.checked_mul(HUNDRED)),
            )
        } else {
            Decimal::ZERO
        };
        Ratios {
            net_profit_rate_pct: ratio_or_zero(
                "net_profit_rate_pct",
                percent_of(net_cash_received, total_receivable),
            ),
            annualized_cost_rate_pct,
            interest_cost_ratio_pct: ratio_or_zero(
                "interest_cost_ratio_pct",
                percent_of(interest_cost, total_cost),
            ),
            service_fee_ratio_pct: ratio_or_zero(
                "service_fee_ratio_pct",
                percent_of(service_fee, total_cost),
            ),
        }
    } else {
        Ratios::default()
    };

    debug!(
        %total_receivable,
        %total_cost,
        %net_cash_received,
        convention = ?params.interest_convention,
        "factoring cost computed"
    );

    Ok(FactoringResult {
        total_receivable,
        advance_amount: advance,
        service_fee,
        interest_cost,
        total_cost,
        net_cash_received,
        reserve,
        tenor_days: days,
        interest_convention: params.interest_convention,
        net_profit_rate_pct: ratios.net_profit_rate_pct,
        annualized_cost_rate_pct: ratios.annualized_cost_rate_pct,
        interest_cost_ratio_pct: ratios.interest_cost_ratio_pct,
        service_fee_ratio_pct: ratios.service_fee_ratio_pct,
    })
}

/// Compute the factoring cost and wrap it in the standard output envelope,
/// with advisory warnings for unusual but valid inputs.
pub fn analyze_factoring(
    params: &TransactionParameters,
) -> FactoringEngineResult<ComputationOutput<FactoringResult>> {
    let start = Instant::now();
    let result = compute_factoring_cost(params)?;
    let warnings = advisory_warnings(params, &result);
    for w in &warnings {
        warn!("{w}");
    }

    let methodology = match params.interest_convention {
        InterestConvention::SimpleAnnual => {
            "Invoice factoring -- simple annual discount interest, 30/360 ratio basis"
        }
        InterestConvention::DayCount30360 => {
            "Invoice factoring -- daily-rate discount interest, 30/360 basis"
        }
    };

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        methodology,
        &serde_json::json!({
            "day_count": "30/360",
            "interest_convention": format!("{:?}", params.interest_convention),
            "advance_rate": params.advance_rate.to_string(),
            "tenor_months": params.tenor_months,
        }),
        warnings,
        elapsed,
        result,
    )
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Ratios {
    net_profit_rate_pct: Decimal,
    annualized_cost_rate_pct: Decimal,
    interest_cost_ratio_pct: Decimal,
    service_fee_ratio_pct: Decimal,
}

fn out_of_range(field: &str, item: &str) -> FactoringError {
    FactoringError::InvalidInput {
        field: field.into(),
        reason: format!("{item} exceeds the representable Decimal range"),
    }
}

fn percent_of(part: Decimal, whole: Decimal) -> Option<Decimal> {
    part.checked_div(whole)?.checked_mul(HUNDRED)
}

/// An unrepresentable ratio is reported as 0, like any other suppressed ratio.
fn ratio_or_zero(name: &str, ratio: Option<Decimal>) -> Decimal {
    ratio.unwrap_or_else(|| {
        warn!(ratio = name, "ratio overflowed the Decimal range; reporting zero");
        Decimal::ZERO
    })
}

fn validate_advance_rate(advance_rate: Rate) -> FactoringEngineResult<()> {
    if advance_rate <= Decimal::ZERO || advance_rate > Decimal::ONE {
        return Err(FactoringError::InvalidInput {
            field: "advance_rate".into(),
            reason: format!("Advance rate must lie in (0, 1], got {advance_rate}"),
        });
    }
    Ok(())
}

fn advisory_warnings(params: &TransactionParameters, result: &FactoringResult) -> Vec<String> {
    let mut warnings = Vec::new();

    if result.net_cash_received <= Decimal::ZERO {
        warnings.push(format!(
            "Net cash received is {} -- costs consume the whole advance; ratios reported as zero",
            result.net_cash_received
        ));
    }
    if result.total_cost > result.reserve {
        warnings.push(format!(
            "Total cost {} exceeds the reserve {}; nothing is released at collection",
            result.total_cost, result.reserve
        ));
    }
    if params.tenor_months == 0 || params.tenor_months > MAX_CUSTOMARY_TENOR_MONTHS {
        warnings.push(format!(
            "Tenor of {} months is outside the customary 1-12 month range",
            params.tenor_months
        ));
    }
    if params.advance_rate < MIN_CUSTOMARY_ADVANCE_RATE
        || params.advance_rate > MAX_CUSTOMARY_ADVANCE_RATE
    {
        warnings.push(format!(
            "Advance rate {} is outside the customary 50%-95% band",
            params.advance_rate
        ));
    }

    warnings
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
