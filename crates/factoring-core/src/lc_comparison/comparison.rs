use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::warn;

use super::pricing::{compute_lc_cost, LcComparisonInput, LcComparisonResult, LcRates};
use crate::factoring::{compute_factoring_cost, FactoringResult, TransactionParameters};
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::FactoringEngineResult;

/// Which instrument costs less for the same receivable and tenor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheaperInstrument {
    Factoring,
    LetterOfCredit,
    Equal,
}

impl std::fmt::Display for CheaperInstrument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheaperInstrument::Factoring => write!(f, "Factoring"),
            CheaperInstrument::LetterOfCredit => write!(f, "Letter of Credit"),
            CheaperInstrument::Equal => write!(f, "Equal"),
        }
    }
}

/// Factoring and L/C costs side by side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstrumentComparison {
    pub factoring: FactoringResult,
    pub letter_of_credit: LcComparisonResult,
    pub factoring_total_cost: Money,
    pub lc_total_cost: Money,
    /// Factoring cost minus L/C cost; positive when the L/C is cheaper.
    pub cost_difference: Money,
    pub cheaper: CheaperInstrument,
}

/// Price the factoring deal and an L/C on the same receivable and tenor.
pub fn compare_instruments(
    params: &TransactionParameters,
    rates: &LcRates,
) -> FactoringEngineResult<ComputationOutput<InstrumentComparison>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let factoring = compute_factoring_cost(params)?;
    let lc_input =
        LcComparisonInput::from_rates(factoring.total_receivable, rates, params.tenor_months);
    let letter_of_credit = compute_lc_cost(&lc_input);

    if rates.has_negative_rate() {
        let msg = "Negative L/C rate supplied; L/C cost may be understated".to_string();
        warn!("{msg}");
        warnings.push(msg);
    }

    let cost_difference = factoring.total_cost - letter_of_credit.total_lc_cost;
    let cheaper = if cost_difference > Decimal::ZERO {
        CheaperInstrument::LetterOfCredit
    } else if cost_difference < Decimal::ZERO {
        CheaperInstrument::Factoring
    } else {
        CheaperInstrument::Equal
    };

    let output = InstrumentComparison {
        factoring_total_cost: factoring.total_cost,
        lc_total_cost: letter_of_credit.total_lc_cost,
        cost_difference,
        cheaper,
        factoring,
        letter_of_credit,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "Factoring vs. letter of credit -- L/C margin locked for the factoring tenor",
        &serde_json::json!({
            "interest_convention": format!("{:?}", params.interest_convention),
            "tenor_months": params.tenor_months,
            "lc_rates": rates,
        }),
        warnings,
        elapsed,
        output,
    )
}
