use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::FactoringEngineResult;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%), unless a field name ends in `_pct`.
pub type Rate = Decimal;

/// One labelled entry of an output mapping handed to display layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub label: String,
    pub value: Decimal,
}

impl Metric {
    pub fn new(label: impl Into<String>, value: Decimal) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata. Fails with
/// `SerializationError` when the assumptions cannot be expressed as JSON.
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> FactoringEngineResult<ComputationOutput<T>> {
    Ok(ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions)?,
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FactoringError;
    use std::collections::BTreeMap;

    #[test]
    fn test_envelope_carries_assumptions() {
        let out = with_metadata(
            "test",
            &serde_json::json!({ "tenor_months": 3 }),
            vec!["note".into()],
            7,
            Metric::new("Reserve", Decimal::ONE),
        )
        .unwrap();
        assert_eq!(out.assumptions["tenor_months"], 3);
        assert_eq!(out.warnings, vec!["note".to_string()]);
        assert_eq!(out.metadata.computation_time_us, 7);
    }

    #[test]
    fn test_non_json_assumptions_are_a_serialization_error() {
        // JSON object keys must be strings
        let mut assumptions = BTreeMap::new();
        assumptions.insert((3u32, 12u32), "tenor/rate");

        let err = with_metadata("test", &assumptions, Vec::new(), 0, Decimal::ZERO).unwrap_err();
        assert!(matches!(err, FactoringError::SerializationError(_)));
    }
}
