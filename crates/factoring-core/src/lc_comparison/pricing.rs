//! Letter-of-credit cost on a factoring-equivalent basis.
//!
//! The L/C carries a flat fee on the receivable plus the opportunity cost of
//! a cash margin held as collateral. The margin is assumed locked for the
//! same tenor as the factoring deal.
//!
//! All L/C rates are percentages (0.15 = 0.15%), unlike the fractional rates
//! of the factoring engine.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{Money, Rate};

const HUNDRED: Decimal = dec!(100);
const MONTHS_IN_YEAR: Decimal = dec!(12);

/// Percentage rates quoted for a letter of credit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LcRates {
    /// Issuance fee as a percentage of the receivable.
    pub lc_fee_rate_pct: Rate,
    /// Cash margin as a percentage of the receivable.
    pub margin_rate_pct: Rate,
    /// Annual cost of capital tied up in the margin, percent.
    pub cost_of_capital_annual_pct: Rate,
}

impl Default for LcRates {
    fn default() -> Self {
        Self {
            lc_fee_rate_pct: dec!(0.15),
            margin_rate_pct: dec!(20),
            cost_of_capital_annual_pct: dec!(8),
        }
    }
}

impl LcRates {
    pub fn has_negative_rate(&self) -> bool {
        self.lc_fee_rate_pct < Decimal::ZERO
            || self.margin_rate_pct < Decimal::ZERO
            || self.cost_of_capital_annual_pct < Decimal::ZERO
    }
}

/// Input for L/C pricing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LcComparisonInput {
    /// Receivable the L/C would cover.
    pub total_receivable: Money,
    pub lc_fee_rate_pct: Rate,
    pub margin_rate_pct: Rate,
    pub cost_of_capital_annual_pct: Rate,
    pub tenor_months: u32,
}

impl LcComparisonInput {
    pub fn from_rates(total_receivable: Money, rates: &LcRates, tenor_months: u32) -> Self {
        Self {
            total_receivable,
            lc_fee_rate_pct: rates.lc_fee_rate_pct,
            margin_rate_pct: rates.margin_rate_pct,
            cost_of_capital_annual_pct: rates.cost_of_capital_annual_pct,
            tenor_months,
        }
    }
}

/// Cost breakdown of the L/C alternative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LcComparisonResult {
    /// Receivable x fee%.
    pub lc_fee: Money,
    /// Cash held as collateral = receivable x margin%.
    pub margin_amount: Money,
    /// Margin x cost of capital% x months / 12.
    pub opportunity_cost: Money,
    /// Fee + opportunity cost. The margin itself is returned, so it is not a cost.
    pub total_lc_cost: Money,
}

/// Price the L/C alternative. Pure arithmetic with no failure modes.
pub fn compute_lc_cost(input: &LcComparisonInput) -> LcComparisonResult {
    let lc_fee = input.total_receivable * input.lc_fee_rate_pct / HUNDRED;
    let margin_amount = input.total_receivable * input.margin_rate_pct / HUNDRED;
    let opportunity_cost = margin_amount * input.cost_of_capital_annual_pct / HUNDRED
        * Decimal::from(input.tenor_months)
        / MONTHS_IN_YEAR;
    let total_lc_cost = lc_fee + opportunity_cost;

    debug!(%lc_fee, %margin_amount, %opportunity_cost, "letter of credit priced");

    LcComparisonResult {
        lc_fee,
        margin_amount,
        opportunity_cost,
        total_lc_cost,
    }
}
