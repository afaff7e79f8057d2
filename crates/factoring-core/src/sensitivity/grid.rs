use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::sweep::{rate_label, tenor_label};
use crate::factoring::{compute_factoring_cost, FactoringMetric, TransactionParameters};
use crate::types::{with_metadata, ComputationOutput, Rate};
use crate::FactoringEngineResult;

/// Two-way tenor x rate sensitivity table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityGrid {
    pub metric: FactoringMetric,
    pub tenors: Vec<u32>,
    pub rates: Vec<Rate>,
    pub tenor_labels: Vec<String>,
    pub rate_labels: Vec<String>,
    /// matrix[i][j] = metric at tenors[i], rates[j]
    pub matrix: Vec<Vec<Decimal>>,
    /// Metric value for the unmodified base parameters.
    pub base_case_value: Decimal,
    /// Cell closest to the base parameters, if the grid is non-empty.
    pub base_case_position: Option<(usize, usize)>,
}

/// Evaluate `metric` for every tenor/rate pair, holding all other
/// parameters at their base values.
pub fn tenor_rate_grid(
    base: &TransactionParameters,
    tenors: &[u32],
    rates: &[Rate],
    metric: FactoringMetric,
) -> FactoringEngineResult<ComputationOutput<SensitivityGrid>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let base_case_value = metric.value_of(&compute_factoring_cost(base)?);

    let mut matrix = Vec::with_capacity(tenors.len());
    for &tenor in tenors {
        let mut row = Vec::with_capacity(rates.len());
        for &rate in rates {
            let params = base.with_tenor_months(tenor).with_discount_rate(rate);
            row.push(metric.value_of(&compute_factoring_cost(&params)?));
        }
        matrix.push(row);
    }

    let base_case_position = if tenors.is_empty() || rates.is_empty() {
        warnings.push("Empty tenor or rate scenario list; grid has no cells".into());
        None
    } else {
        let row = closest_index(tenors, |t| {
            (Decimal::from(t) - Decimal::from(base.tenor_months)).abs()
        });
        let col = closest_index(rates, |r| (r - base.discount_rate_annual).abs());
        Some((row, col))
    };

    let output = SensitivityGrid {
        metric,
        tenor_labels: tenors.iter().map(|&t| tenor_label(t)).collect(),
        rate_labels: rates.iter().map(|&r| rate_label(r)).collect(),
        tenors: tenors.to_vec(),
        rates: rates.to_vec(),
        matrix,
        base_case_value,
        base_case_position,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "Tenor x discount-rate sensitivity grid",
        &serde_json::json!({
            "metric": metric.label(),
            "interest_convention": format!("{:?}", base.interest_convention),
        }),
        warnings,
        elapsed,
        output,
    )
}

/// Index of the value nearest the base case; first one wins on ties.
fn closest_index<T: Copy>(values: &[T], distance: impl Fn(T) -> Decimal) -> usize {
    values
        .iter()
        .enumerate()
        .min_by_key(|(_, v)| distance(**v))
        .map(|(i, _)| i)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn reference_params() -> TransactionParameters {
        TransactionParameters::new(dec!(120000), dec!(0.8), dec!(0.02), dec!(0.12), 3)
    }

    #[test]
    fn test_grid_dimensions_and_values() {
        let out = tenor_rate_grid(
            &reference_params(),
            &[3, 6, 12],
            &[dec!(0.08), dec!(0.12)],
            FactoringMetric::NetCashReceived,
        )
        .unwrap();
        let grid = &out.result;

        assert_eq!(grid.matrix.len(), 3);
        assert!(grid.matrix.iter().all(|row| row.len() == 2));
        // 3 months @ 12% is the reference deal
        assert_eq!(grid.matrix[0][1], dec!(113400));
        // 12 months @ 8%: 120_000 - 3_000 - 9_600
        assert_eq!(grid.matrix[2][0], dec!(107400));
        assert_eq!(grid.tenor_labels, vec!["3 months", "6 months", "12 months"]);
        assert_eq!(grid.rate_labels, vec!["8%", "12%"]);
    }

    #[test]
    fn test_grid_monotone_in_both_directions() {
        let out = tenor_rate_grid(
            &reference_params(),
            &[3, 6, 9, 12],
            &[dec!(0.08), dec!(0.10), dec!(0.12), dec!(0.15)],
            FactoringMetric::NetCashReceived,
        )
        .unwrap();
        let m = &out.result.matrix;

        for i in 0..m.len() - 1 {
            for j in 0..m[0].len() {
                assert!(m[i][j] > m[i + 1][j]);
            }
        }
        for row in m {
            for j in 0..row.len() - 1 {
                assert!(row[j] > row[j + 1]);
            }
        }
    }

    #[test]
    fn test_base_case_position() {
        let out = tenor_rate_grid(
            &reference_params(),
            &[1, 4, 12],
            &[dec!(0.05), dec!(0.11), dec!(0.2)],
            FactoringMetric::TotalCost,
        )
        .unwrap();
        // tenor 3 is nearest 4, rate 0.12 nearest 0.11
        assert_eq!(out.result.base_case_position, Some((1, 1)));
        assert_eq!(out.result.base_case_value, dec!(6600));
    }

    #[test]
    fn test_empty_grid_warns() {
        let out = tenor_rate_grid(
            &reference_params(),
            &[],
            &[dec!(0.1)],
            FactoringMetric::NetCashReceived,
        )
        .unwrap();
        assert!(out.result.matrix.is_empty());
        assert_eq!(out.result.base_case_position, None);
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_invalid_base_rejected() {
        let params = TransactionParameters {
            advance_rate: dec!(0),
            ..reference_params()
        };
        assert!(tenor_rate_grid(&params, &[3], &[dec!(0.1)], FactoringMetric::TotalCost).is_err());
    }
}
