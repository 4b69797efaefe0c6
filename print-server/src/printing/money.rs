//! Money formatting using rust_decimal for precision
//!
//! Amounts arrive as JSON numbers or strings and are printed with exactly
//! two decimal places, rounding half away from zero.

use std::str::FromStr;

use rust_decimal::prelude::*;
use thiserror::Error;

use super::types::Scalar;

/// Decimal places printed for every amount
const DECIMAL_PLACES: u32 = 2;

#[derive(Debug, Error, PartialEq)]
pub enum MoneyError {
    #[error("not a number: {0}")]
    NotANumber(String),
    #[error("missing")]
    Missing,
    #[error("out of range")]
    Overflow,
}

/// Parse an amount into a decimal
pub fn parse_amount(value: &Scalar) -> Result<Decimal, MoneyError> {
    let not_a_number = || MoneyError::NotANumber(value.to_string());
    match value {
        // Shortest round-trip text keeps 1.005 as 1.005 rather than its binary expansion
        Scalar::Number(n) => Decimal::from_str(&n.to_string())
            .ok()
            .or_else(|| Decimal::from_f64(*n))
            .ok_or_else(not_a_number),
        Scalar::Text(s) => {
            let s = s.trim();
            Decimal::from_str(s)
                .ok()
                .or_else(|| {
                    // Exponent notation such as "1e3"
                    s.parse::<f64>()
                        .ok()
                        .filter(|n| n.is_finite())
                        .and_then(Decimal::from_f64)
                })
                .ok_or_else(not_a_number)
        }
        Scalar::Bool(_) => Err(not_a_number()),
    }
}

/// Parse an amount that must be supplied
pub fn require_amount(value: Option<&Scalar>) -> Result<Decimal, MoneyError> {
    value.ok_or(MoneyError::Missing).and_then(parse_amount)
}

/// Parse an optional amount, treating absence as zero
pub fn amount_or_zero(value: Option<&Scalar>) -> Result<Decimal, MoneyError> {
    value.map_or(Ok(Decimal::ZERO), parse_amount)
}

/// Format a decimal with two places
pub fn format_decimal(amount: Decimal) -> String {
    let mut rounded =
        amount.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(DECIMAL_PLACES);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded.to_string()
}

/// Parse and format an amount with two places
pub fn format_money(value: &Scalar) -> Result<String, MoneyError> {
    parse_amount(value).map(format_decimal)
}

/// Bill-level discount in currency units
///
/// A negative discount is an absolute amount; a positive one is a
/// percentage of the subtotal.
pub fn resolve_discount(discount: Decimal, subtotal: Decimal) -> Result<Decimal, MoneyError> {
    if discount.is_sign_negative() && !discount.is_zero() {
        Ok(discount.abs())
    } else {
        subtotal
            .checked_mul(discount)
            .and_then(|d| d.checked_div(Decimal::ONE_HUNDRED))
            .ok_or(MoneyError::Overflow)
    }
}

/// Sum of two amounts
pub fn add_amounts(a: Decimal, b: Decimal) -> Result<Decimal, MoneyError> {
    a.checked_add(b).ok_or(MoneyError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Scalar {
        Scalar::Text(s.to_string())
    }

    #[test]
    fn test_two_decimal_places() {
        assert_eq!(format_money(&Scalar::Number(2.0)).unwrap(), "2.00");
        assert_eq!(format_money(&Scalar::Number(199.5)).unwrap(), "199.50");
        assert_eq!(format_money(&text(" 42 ")).unwrap(), "42.00");
        assert_eq!(format_money(&text("1e3")).unwrap(), "1000.00");
    }

    #[test]
    fn test_rounds_half_away_from_zero() {
        assert_eq!(format_money(&Scalar::Number(1.005)).unwrap(), "1.01");
        assert_eq!(format_money(&text("-2.345")).unwrap(), "-2.35");
        assert_eq!(format_money(&text("-0.001")).unwrap(), "0.00");
    }

    #[test]
    fn test_idempotent_on_formatted_strings() {
        for s in ["0.00", "10.00", "190.00", "-50.25", "123456.78"] {
            let once = format_money(&text(s)).unwrap();
            assert_eq!(once, s);
            assert_eq!(format_money(&text(&once)).unwrap(), once);
        }
    }

    #[test]
    fn test_non_numeric_is_rejected() {
        assert_eq!(
            format_money(&text("abc")),
            Err(MoneyError::NotANumber("abc".into()))
        );
        assert!(format_money(&text("")).is_err());
        assert!(format_money(&Scalar::Bool(true)).is_err());
    }

    #[test]
    fn test_missing_amounts() {
        assert_eq!(require_amount(None), Err(MoneyError::Missing));
        assert_eq!(amount_or_zero(None), Ok(Decimal::ZERO));
        assert_eq!(amount_or_zero(Some(&text("12"))), Ok(Decimal::from(12)));
    }

    #[test]
    fn test_negative_discount_is_absolute() {
        assert_eq!(resolve_discount(Decimal::from(-50), Decimal::from(200)), Ok(Decimal::from(50)));
        assert_eq!(resolve_discount(Decimal::from(-50), Decimal::from(0)), Ok(Decimal::from(50)));
    }

    #[test]
    fn test_positive_discount_is_percentage() {
        assert_eq!(resolve_discount(Decimal::from(10), Decimal::from(200)), Ok(Decimal::from(20)));
        assert_eq!(
            format_decimal(resolve_discount(Decimal::from(5), Decimal::from(200)).unwrap()),
            "10.00"
        );
        assert_eq!(resolve_discount(Decimal::from(0), Decimal::from(200)), Ok(Decimal::from(0)));
    }

    #[test]
    fn test_huge_amounts_overflow_instead_of_panicking() {
        let subtotal = parse_amount(&text("10000000000000000000000000000")).unwrap();
        assert_eq!(
            resolve_discount(Decimal::from(10), subtotal),
            Err(MoneyError::Overflow)
        );
        assert_eq!(add_amounts(Decimal::MAX, Decimal::ONE), Err(MoneyError::Overflow));
        assert_eq!(add_amounts(Decimal::from(25), Decimal::from(15)), Ok(Decimal::from(40)));
    }
}
