//! Currency Text Tests
//!
//! Display strings must re-parse to the value they were made from, so a
//! form can show a formatted default and read it back unchanged.

use flo_finance_core::{format_currency, format_fte, parse_currency, parse_fte, ParseError};
use proptest::prelude::*;

#[test]
fn test_format_examples() {
    assert_eq!(format_currency(123_450), "$1,234.50");
    assert_eq!(format_currency(100_000_000), "$1,000,000.00");
    assert_eq!(format_currency(-7_308_000), "-$73,080.00");
}

#[test]
fn test_round_trip_example() {
    let text = format_currency(123_450);
    assert_eq!(parse_currency(&text), Ok(123_450));
}

#[test]
fn test_user_edits_accepted() {
    assert_eq!(parse_currency("$1,234.56"), Ok(123_456));
    assert_eq!(parse_currency("1234.5"), Ok(123_450));
    assert_eq!(parse_currency(" 90 "), Ok(9_000));
    assert_eq!(parse_currency("$.99"), Ok(99));
}

#[test]
fn test_user_edits_rejected() {
    assert_eq!(parse_currency(""), Err(ParseError::Empty));
    assert_eq!(
        parse_currency("USD 45"),
        Err(ParseError::NotANumber("USD 45".to_string()))
    );
    assert!(parse_currency("45.00.00").is_err());
}

#[test]
fn test_fte_text() {
    assert_eq!(format_fte(12.5), "12.5");
    assert_eq!(format_fte(3.0), "3.0");
    assert_eq!(parse_fte("12.5"), Ok(12.5));
    assert!(parse_fte("1,200").is_err());
}

proptest! {
    #[test]
    fn prop_currency_round_trip(cents in -1_000_000_000_000i64..1_000_000_000_000i64) {
        let text = format_currency(cents);
        prop_assert_eq!(parse_currency(&text), Ok(cents));
    }

    #[test]
    fn prop_fte_round_trip(tenths in 0i64..100_000) {
        let value = tenths as f64 / 10.0;
        prop_assert_eq!(parse_fte(&format_fte(value)), Ok(value));
    }
}
