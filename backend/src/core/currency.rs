//! Currency and FTE text handling
//!
//! All money values are i64 cents. The helpers here sit at the presentation
//! boundary: formatting numbers for display and coercing user-edited text
//! back into numbers. Nothing inside the calculator rounds; rounding to whole
//! cents happens only through [`round_cents`].

use thiserror::Error;

/// Errors raised when user-edited text cannot be read as a number
///
/// Callers recover from these locally (see `InputSession`), so they never
/// surface past the input layer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("Input is empty")]
    Empty,

    #[error("Not a number: '{0}'")]
    NotANumber(String),

    #[error("Value out of range: '{0}'")]
    OutOfRange(String),
}

/// Format cents as a dollar string with thousands separators
///
/// # Example
/// ```
/// use flo_finance_core::format_currency;
///
/// assert_eq!(format_currency(123_450), "$1,234.50");
/// assert_eq!(format_currency(-5), "-$0.05");
/// ```
pub fn format_currency(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}${}.{:02}", sign, group_thousands(abs / 100), abs % 100)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Read a decorated numeric string as a plain f64
///
/// Strips surrounding whitespace, dollar signs, and thousands separators
/// before parsing. Non-finite values are rejected.
pub fn parse_amount(input: &str) -> Result<f64, ParseError> {
    let cleaned: String = input
        .trim()
        .chars()
        .filter(|c| *c != '$' && *c != ',')
        .collect();

    if cleaned.is_empty() {
        return Err(ParseError::Empty);
    }

    let value: f64 = cleaned
        .parse()
        .map_err(|_| ParseError::NotANumber(input.to_string()))?;

    if !value.is_finite() {
        return Err(ParseError::NotANumber(input.to_string()));
    }

    Ok(value)
}

/// Parse a user-edited currency string into cents
///
/// The value is rounded to 2 decimal places (whole cents).
///
/// # Example
/// ```
/// use flo_finance_core::parse_currency;
///
/// assert_eq!(parse_currency("$1,234.56"), Ok(123_456));
/// assert_eq!(parse_currency("45"), Ok(4_500));
/// assert!(parse_currency("forty five").is_err());
/// ```
pub fn parse_currency(input: &str) -> Result<i64, ParseError> {
    let dollars = parse_amount(input)?;
    let cents = (dollars * 100.0).round();

    if cents.abs() >= i64::MAX as f64 {
        return Err(ParseError::OutOfRange(input.to_string()));
    }

    Ok(cents as i64)
}

/// Parse a user-edited FTE count, rounded to 1 decimal place
pub fn parse_fte(input: &str) -> Result<f64, ParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }

    let value: f64 = trimmed
        .parse()
        .map_err(|_| ParseError::NotANumber(input.to_string()))?;

    if !value.is_finite() {
        return Err(ParseError::NotANumber(input.to_string()));
    }

    let rounded = round_fte(value);
    if !(rounded * 10.0).is_finite() {
        return Err(ParseError::OutOfRange(input.to_string()));
    }

    Ok(rounded)
}

/// Round an FTE count to 1 decimal place
///
/// Values too large to scale are already whole and come back unchanged, so
/// finite input always gives finite output.
pub fn round_fte(value: f64) -> f64 {
    let scaled = value * 10.0;
    if scaled.is_finite() {
        scaled.round() / 10.0
    } else {
        value
    }
}

/// Format an FTE count with 1 decimal place
pub fn format_fte(value: f64) -> String {
    format!("{:.1}", value)
}

/// Round an unrounded cent amount to whole cents for display
///
/// Non-finite input maps to 0.
pub fn round_cents(value: f64) -> i64 {
    if value.is_finite() {
        value.round() as i64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_format_currency_small_values() {
        assert_eq!(format_currency(0), "$0.00");
        assert_eq!(format_currency(7), "$0.07");
        assert_eq!(format_currency(4_500), "$45.00");
    }

    #[test]
    fn test_parse_amount_strips_decoration() {
        assert_eq!(parse_amount("  $1,200.5 "), Ok(1200.5));
        assert_eq!(parse_amount("-$3"), Ok(-3.0));
    }

    #[test]
    fn test_parse_amount_rejects_non_finite() {
        assert!(matches!(parse_amount("inf"), Err(ParseError::NotANumber(_))));
        assert!(matches!(parse_amount("NaN"), Err(ParseError::NotANumber(_))));
    }

    #[test]
    fn test_parse_currency_rounds_to_cents() {
        assert_eq!(parse_currency("45.006"), Ok(4_501));
        assert_eq!(parse_currency("$0.004"), Ok(0));
    }

    #[test]
    fn test_parse_currency_empty() {
        assert_eq!(parse_currency("   "), Err(ParseError::Empty));
        assert_eq!(parse_currency("$"), Err(ParseError::Empty));
    }

    #[test]
    fn test_parse_currency_out_of_range() {
        assert!(matches!(
            parse_currency("1e30"),
            Err(ParseError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_parse_fte_rounds_to_one_decimal() {
        assert_eq!(parse_fte("12.46"), Ok(12.5));
        assert_eq!(parse_fte(" 3 "), Ok(3.0));
        assert!(parse_fte("twelve").is_err());
    }

    #[test]
    fn test_parse_fte_rejects_unscalable_values() {
        assert!(matches!(parse_fte("1e308"), Err(ParseError::OutOfRange(_))));
        assert!(matches!(parse_fte("-1e308"), Err(ParseError::OutOfRange(_))));
        assert_eq!(parse_fte("123456789.5"), Ok(123_456_789.5));
    }

    #[test]
    fn test_round_fte_stays_finite() {
        assert_eq!(round_fte(1e308), 1e308);
        assert_eq!(round_fte(f64::MAX), f64::MAX);
        assert_eq!(round_fte(7.26), 7.3);
    }

    #[test]
    fn test_round_cents_non_finite() {
        assert_eq!(round_cents(f64::NAN), 0);
        assert_eq!(round_cents(f64::INFINITY), 0);
        assert_eq!(round_cents(1_234.5), 1_235);
    }
}
