use factoring_core::factoring::{
    analyze_factoring, compute_factoring_cost, InterestConvention, TransactionParameters,
};
use factoring_core::FactoringError;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Reference deal
// ===========================================================================

fn reference_deal() -> TransactionParameters {
    TransactionParameters::new(dec!(120000), dec!(0.8), dec!(0.02), dec!(0.12), 3)
}

#[test]
fn test_reference_deal_line_items() {
    let result = compute_factoring_cost(&reference_deal()).unwrap();

    assert_eq!(result.total_receivable.round_dp(2), dec!(150000.00));
    assert_eq!(result.service_fee.round_dp(2), dec!(3000.00));
    assert_eq!(result.interest_cost.round_dp(2), dec!(3600.00));
    assert_eq!(result.total_cost.round_dp(2), dec!(6600.00));
    assert_eq!(result.net_cash_received.round_dp(2), dec!(113400.00));
    assert_eq!(result.reserve.round_dp(2), dec!(30000.00));
}

#[test]
fn test_reference_deal_from_json() {
    // Shape produced by a parameter-collection form
    let params: TransactionParameters = serde_json::from_str(
        r#"{
            "advance_amount": "120000",
            "advance_rate": "0.8",
            "service_fee_rate": "0.02",
            "discount_rate_annual": "0.12",
            "tenor_months": 3,
            "interest_convention": "SimpleAnnual"
        }"#,
    )
    .unwrap();
    assert_eq!(params, reference_deal());
    let result = compute_factoring_cost(&params).unwrap();
    assert_eq!(result.net_cash_received, dec!(113400));
}

#[test]
fn test_conventions_agree_at_cents_for_whole_months() {
    for months in 1..=12 {
        let simple = compute_factoring_cost(&reference_deal().with_tenor_months(months)).unwrap();
        let day_count = compute_factoring_cost(
            &reference_deal()
                .with_tenor_months(months)
                .with_convention(InterestConvention::DayCount30360),
        )
        .unwrap();
        assert_eq!(
            simple.interest_cost.round_dp(2),
            day_count.interest_cost.round_dp(2),
            "conventions diverge at {months} months"
        );
    }
}

#[test]
fn test_full_advance_rate_boundary() {
    let params = TransactionParameters {
        advance_rate: dec!(1.0),
        ..reference_deal()
    };
    let result = compute_factoring_cost(&params).unwrap();
    assert_eq!(result.total_receivable, result.advance_amount);
}

#[test]
fn test_out_of_domain_advance_rates() {
    for rate in [dec!(0), dec!(1.5), dec!(-0.1), dec!(1.0000001)] {
        let params = TransactionParameters {
            advance_rate: rate,
            ..reference_deal()
        };
        let err = compute_factoring_cost(&params).unwrap_err();
        assert!(
            matches!(err, FactoringError::InvalidInput { ref field, .. } if field == "advance_rate"),
            "rate {rate} gave {err:?}"
        );
        assert!(analyze_factoring(&params).is_err());
    }
}

#[test]
fn test_output_envelope_serializes() {
    let out = analyze_factoring(&reference_deal()).unwrap();
    let json = serde_json::to_value(&out).unwrap();

    // Decimals serialize as strings
    let net_cash: Decimal = json["result"]["net_cash_received"]
        .as_str()
        .unwrap()
        .parse()
        .unwrap();
    assert_eq!(net_cash, dec!(113400));
    assert_eq!(json["assumptions"]["day_count"], "30/360");
    assert!(json["warnings"].as_array().unwrap().is_empty());
}

#[test]
fn test_zero_cost_guard_via_envelope() {
    let params = TransactionParameters::new(dec!(80000), dec!(0.8), dec!(0), dec!(0), 3);
    let out = analyze_factoring(&params).unwrap();
    let r = &out.result;

    assert_eq!(r.total_cost, Decimal::ZERO);
    for ratio in [
        r.net_profit_rate_pct,
        r.annualized_cost_rate_pct,
        r.interest_cost_ratio_pct,
        r.service_fee_ratio_pct,
    ] {
        assert_eq!(ratio, Decimal::ZERO);
    }
}

// ===========================================================================
// Algebraic identities
// ===========================================================================

fn params_strategy() -> impl Strategy<Value = TransactionParameters> {
    (
        1i64..10_000_000_000,
        1i64..=100,
        0i64..=500,
        0i64..=3000,
        1u32..=24,
        prop_oneof![
            Just(InterestConvention::SimpleAnnual),
            Just(InterestConvention::DayCount30360)
        ],
    )
        .prop_map(
            |(advance_cents, rate_pct, fee_bps, discount_bps, tenor, convention)| {
                TransactionParameters::new(
                    Decimal::new(advance_cents, 2),
                    Decimal::new(rate_pct, 2),
                    Decimal::new(fee_bps, 4),
                    Decimal::new(discount_bps, 4),
                    tenor,
                )
                .with_convention(convention)
            },
        )
}

proptest! {
    #[test]
    fn prop_cost_identities_hold_exactly(params in params_strategy()) {
        let r = compute_factoring_cost(&params).unwrap();

        prop_assert_eq!(r.total_cost, r.service_fee + r.interest_cost);
        prop_assert_eq!(r.net_cash_received, params.advance_amount - r.total_cost);
        prop_assert_eq!(r.reserve, r.total_receivable - params.advance_amount);
        prop_assert!(r.reserve >= Decimal::ZERO);
    }

    #[test]
    fn prop_receivable_round_trips(params in params_strategy()) {
        let r = compute_factoring_cost(&params).unwrap();
        let back = r.total_receivable * params.advance_rate;
        prop_assert!(
            (back - params.advance_amount).abs() < dec!(0.000000001),
            "{} * {} = {}", r.total_receivable, params.advance_rate, back
        );
    }

    #[test]
    fn prop_ratio_guard(params in params_strategy()) {
        let r = compute_factoring_cost(&params).unwrap();
        if r.total_cost <= Decimal::ZERO || r.net_cash_received <= Decimal::ZERO {
            prop_assert_eq!(r.net_profit_rate_pct, Decimal::ZERO);
            prop_assert_eq!(r.annualized_cost_rate_pct, Decimal::ZERO);
            prop_assert_eq!(r.interest_cost_ratio_pct, Decimal::ZERO);
            prop_assert_eq!(r.service_fee_ratio_pct, Decimal::ZERO);
        } else {
            let shares = r.interest_cost_ratio_pct + r.service_fee_ratio_pct;
            prop_assert!((shares - dec!(100)).abs() < dec!(0.000001));
        }
    }
}
