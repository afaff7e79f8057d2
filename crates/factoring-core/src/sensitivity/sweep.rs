use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::factoring::{compute_factoring_cost, FactoringMetric, TransactionParameters};
use crate::types::Rate;
use crate::FactoringEngineResult;

/// Tenors compared when the caller supplies none.
pub const DEFAULT_TENOR_SCENARIOS: [u32; 4] = [3, 6, 9, 12];

/// Annual discount rates compared when the caller supplies none.
pub const DEFAULT_RATE_SCENARIOS: [Rate; 5] =
    [dec!(0.08), dec!(0.10), dec!(0.12), dec!(0.15), dec!(0.18)];

/// One scenario outcome, e.g. ("6 months", 110_800).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioPoint {
    pub label: String,
    pub value: Decimal,
}

/// Net cash received for each tenor, all other parameters held fixed.
pub fn sweep_by_tenor(
    base: &TransactionParameters,
    tenor_scenarios: &[u32],
) -> FactoringEngineResult<Vec<ScenarioPoint>> {
    sweep_metric_by_tenor(base, tenor_scenarios, FactoringMetric::NetCashReceived)
}

/// Net cash received for each annual discount rate, all other parameters
/// held fixed.
pub fn sweep_by_interest_rate(
    base: &TransactionParameters,
    rate_scenarios: &[Rate],
) -> FactoringEngineResult<Vec<ScenarioPoint>> {
    sweep_metric_by_interest_rate(base, rate_scenarios, FactoringMetric::NetCashReceived)
}

pub fn sweep_metric_by_tenor(
    base: &TransactionParameters,
    tenor_scenarios: &[u32],
    metric: FactoringMetric,
) -> FactoringEngineResult<Vec<ScenarioPoint>> {
    sweep(
        base,
        tenor_scenarios,
        metric,
        |p, tenor| p.with_tenor_months(tenor),
        tenor_label,
    )
}

pub fn sweep_metric_by_interest_rate(
    base: &TransactionParameters,
    rate_scenarios: &[Rate],
    metric: FactoringMetric,
) -> FactoringEngineResult<Vec<ScenarioPoint>> {
    sweep(
        base,
        rate_scenarios,
        metric,
        |p, rate| p.with_discount_rate(rate),
        rate_label,
    )
}

/// "1 month", "6 months".
pub fn tenor_label(tenor_months: u32) -> String {
    if tenor_months == 1 {
        "1 month".to_string()
    } else {
        format!("{tenor_months} months")
    }
}

/// Fractional rate as a percentage label: 0.12 -> "12%", 0.125 -> "12.5%".
pub fn rate_label(rate: Rate) -> String {
    format!("{}%", (rate * dec!(100)).normalize())
}

fn sweep<T, A, L>(
    base: &TransactionParameters,
    scenarios: &[T],
    metric: FactoringMetric,
    apply: A,
    label: L,
) -> FactoringEngineResult<Vec<ScenarioPoint>>
where
    T: Copy,
    A: Fn(TransactionParameters, T) -> TransactionParameters,
    L: Fn(T) -> String,
{
    let points = scenarios
        .iter()
        .map(|&value| -> FactoringEngineResult<ScenarioPoint> {
            let params = apply(*base, value);
            let result = compute_factoring_cost(&params)?;
            Ok(ScenarioPoint {
                label: label(value),
                value: metric.value_of(&result),
            })
        })
        .collect::<FactoringEngineResult<Vec<_>>>()?;

    debug!(scenarios = points.len(), %metric, "sweep evaluated");
    Ok(points)
}
