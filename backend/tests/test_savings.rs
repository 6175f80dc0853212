//! Savings Calculator Tests
//!
//! The formula is pinned by golden values; these tests must change only
//! when the financial model itself changes.
//!
//! Critical invariants tested:
//! - Golden value for the reference scenario
//! - Purity: identical inputs give bit-identical output
//! - Zero inputs never fault and give 0
//! - Zero amortization period falls back to 0 instead of dividing by zero

use flo_finance_core::{compute_savings, format_currency, round_cents, EstimatorConfig, FinanceModel};
use proptest::prelude::*;

// ============================================================================
// Golden Values
// ============================================================================

#[test]
fn test_general_health_system_golden() {
    // $45.00 staff, $90.00 agency, 12.5 FTE:
    // 12.5 × (2080 × $45.00 − $30,000 / 3) = $1,045,000.00
    let savings = compute_savings(4_500, 9_000, 12.5);
    assert_eq!(savings, 104_500_000.0);
    assert_eq!(format_currency(round_cents(savings)), "$1,045,000.00");
}

#[test]
fn test_fractional_cents_kept_until_display() {
    // 2080 × $0.01 − $10,000 = −$9,979.20 per FTE; × 0.3 FTE = −$2,993.76
    let savings = compute_savings(4_500, 4_501, 0.3);
    assert!((savings - -299_376.0).abs() < 1e-6);
    assert_eq!(format_currency(round_cents(savings)), "-$2,993.76");
}

#[test]
fn test_agency_below_staff_is_negative() {
    // Lakeshore-style record: agency cheaper than staff
    let savings = compute_savings(5_200, 4_900, 4.5);
    // 4.5 × (2080 × −$3.00 − $10,000) = −$73,080.00
    assert_eq!(savings, -7_308_000.0);
}

// ============================================================================
// Boundaries
// ============================================================================

#[test]
fn test_all_zero_inputs() {
    assert_eq!(compute_savings(0, 0, 0.0), 0.0);
}

#[test]
fn test_zero_need_with_rates() {
    assert_eq!(compute_savings(4_500, 9_000, 0.0), 0.0);
    assert_eq!(compute_savings(9_000, 4_500, 0.0), 0.0);
}

#[test]
fn test_zero_amortization_period() {
    let model = FinanceModel {
        amortization_years: 0,
        ..FinanceModel::default()
    };
    assert_eq!(model.compute_savings(4_500, 9_000, 12.5), 0.0);
}

#[test]
fn test_extreme_rates_do_not_overflow() {
    let savings = compute_savings(i64::MIN, i64::MAX, 1.0);
    assert!(savings.is_finite());
}

// ============================================================================
// Configured Models
// ============================================================================

#[test]
fn test_model_from_config() {
    let config = EstimatorConfig::from_json_str(
        r#"{"finance": {"placement_fee": 2400000, "amortization_years": 4, "hours_per_fte_year": 2000}}"#,
    )
    .unwrap();

    // 10 × (2000 × $40.00 − $24,000 / 4) = $740,000.00
    assert_eq!(config.finance.compute_savings(5_000, 9_000, 10.0), 74_000_000.0);
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_deterministic(
        staff in 0i64..100_000,
        agency in 0i64..100_000,
        need in 0.0f64..1_000.0,
    ) {
        let first = compute_savings(staff, agency, need);
        let second = compute_savings(staff, agency, need);
        prop_assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn prop_zero_need_is_zero(staff in 0i64..100_000, agency in 0i64..100_000) {
        prop_assert_eq!(compute_savings(staff, agency, 0.0), 0.0);
    }

    #[test]
    fn prop_higher_agency_rate_saves_more(
        staff in 0i64..100_000,
        agency in 0i64..100_000,
        need in 0.1f64..1_000.0,
    ) {
        prop_assert!(compute_savings(staff, agency + 1, need) > compute_savings(staff, agency, need));
    }

    #[test]
    fn prop_always_finite(
        staff in 0i64..10_000_000,
        agency in 0i64..10_000_000,
        need in 0.0f64..100_000.0,
    ) {
        prop_assert!(compute_savings(staff, agency, need).is_finite());
    }
}
