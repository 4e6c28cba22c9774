//! Monetary and rate arithmetic with two distinct failure tiers.
//!
//! Construction is lenient: blank, malformed, or non-finite input
//! normalizes to zero, because it sits at the parsing edge of
//! user-typed form fields. Computed operations are loud: `divide` is
//! the only fallible operation and it fails explicitly instead of
//! producing garbage. Overflow in the infallible operations collapses
//! to zero rather than propagating an unusable value.
//!
//! Internally backed by `rust_decimal` (128-bit fixed point), which
//! strengthens the "stable to the cent" precision contract without
//! changing the failure semantics callers rely on.

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal as Num, MathematicalOps, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::DebtEngineError;
use crate::DebtEngineResult;

/// Absolute tolerance for equality and zero checks. Absorbs rounding
/// drift between independently computed monetary values.
const EQUALITY_TOLERANCE: Num = dec!(0.000001);

/// An immutable monetary or rate quantity.
///
/// All operations return a new value; comparisons treat two values
/// within 1e-6 of each other as equal (via [`Decimal::is_equal`]).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Decimal(pub(crate) Num);

impl Decimal {
    pub const ZERO: Decimal = Decimal(Num::ZERO);
    pub const ONE: Decimal = Decimal(Num::ONE);
    pub const HUNDRED: Decimal = Decimal(Num::ONE_HUNDRED);
    /// Balances below this are treated as fully repaid.
    pub const ONE_CENT: Decimal = Decimal(dec!(0.01));

    /// Parse a user-supplied numeric string. Never fails: blank or
    /// malformed input, and anything outside the representable range,
    /// normalizes to zero.
    pub fn parse(value: &str) -> Decimal {
        let cleaned = value.trim();
        if cleaned.is_empty() {
            return Decimal::ZERO;
        }
        if let Ok(num) = Num::from_str(cleaned) {
            return Decimal(num);
        }
        if let Ok(num) = Num::from_scientific(cleaned) {
            return Decimal(num);
        }
        cleaned
            .parse::<f64>()
            .ok()
            .and_then(Num::from_f64)
            .map(Decimal)
            .unwrap_or(Decimal::ZERO)
    }

    /// Convert from a native float. Non-finite input normalizes to zero.
    pub fn from_f64(value: f64) -> Decimal {
        Num::from_f64(value).map(Decimal).unwrap_or(Decimal::ZERO)
    }

    pub fn add(self, other: Decimal) -> Decimal {
        self.0.checked_add(other.0).map(Decimal).unwrap_or(Decimal::ZERO)
    }

    pub fn subtract(self, other: Decimal) -> Decimal {
        self.0.checked_sub(other.0).map(Decimal).unwrap_or(Decimal::ZERO)
    }

    pub fn multiply(self, other: Decimal) -> Decimal {
        self.0.checked_mul(other.0).map(Decimal).unwrap_or(Decimal::ZERO)
    }

    /// The only fallible operation: a zero divisor and an
    /// unrepresentable quotient both fail loudly instead of collapsing.
    pub fn divide(self, other: Decimal) -> DebtEngineResult<Decimal> {
        if other.0.is_zero() {
            return Err(DebtEngineError::DivisionByZero {
                context: format!("{} / 0", self.0),
            });
        }
        self.0
            .checked_div(other.0)
            .map(Decimal)
            .ok_or_else(|| DebtEngineError::NonFiniteResult {
                context: format!("{} / {}", self.0, other.0),
            })
    }

    /// Integer exponentiation, for compound-interest factors.
    /// Overflow collapses to zero.
    pub fn power(self, exponent: i64) -> Decimal {
        self.0.checked_powi(exponent).map(Decimal).unwrap_or(Decimal::ZERO)
    }

    pub fn abs(self) -> Decimal {
        Decimal(self.0.abs())
    }

    pub fn is_greater_than(self, other: Decimal) -> bool {
        self.0 > other.0
    }

    pub fn is_less_than(self, other: Decimal) -> bool {
        self.0 < other.0
    }

    /// Approximate equality within an absolute tolerance of 1e-6.
    pub fn is_equal(self, other: Decimal) -> bool {
        match self.0.checked_sub(other.0) {
            Some(diff) => diff.abs() < EQUALITY_TOLERANCE,
            None => false,
        }
    }

    pub fn is_zero(self) -> bool {
        self.0.abs() < EQUALITY_TOLERANCE
    }

    pub fn is_negative(self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Render with exactly `decimals` fractional digits, rounding
    /// midpoints away from zero.
    pub fn to_fixed(self, decimals: u32) -> String {
        let rounded = self
            .0
            .round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
        format!("{rounded:.prec$}", prec = decimals as usize)
    }

    /// Lossy escape hatch for display and interop only. Not meant for
    /// further chained arithmetic.
    pub fn to_f64(self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }
}

impl From<u32> for Decimal {
    fn from(value: u32) -> Self {
        Decimal(Num::from(value))
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Decimal(Num::from(value))
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_fixed(2))
    }
}

/// Format a monetary amount in tr-TR style: dot-grouped thousands,
/// comma decimal separator, optional trailing lira sign.
/// `1234567.89` becomes `1.234.567,89 ₺`.
pub fn format_currency(value: Decimal, show_symbol: bool) -> String {
    let fixed = value.to_fixed(2);
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let formatted = format!("{sign}{grouped},{frac_part}");
    if show_symbol {
        format!("{formatted} ₺")
    } else {
        formatted
    }
}

/// Format a rate as a percent-prefixed string: `3.5` becomes `%3.50`.
pub fn format_percentage(value: Decimal) -> String {
    format!("%{}", value.to_fixed(2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_and_scientific() {
        assert!(Decimal::parse("123.45").is_equal(Decimal::from_f64(123.45)));
        assert!(Decimal::parse(" 42.5 ").is_equal(Decimal::from_f64(42.5)));
        assert!(Decimal::parse("1e3").is_equal(Decimal::from(1000u32)));
        assert!(Decimal::parse("-0.25").is_negative());
    }

    #[test]
    fn test_parse_malformed_normalizes_to_zero() {
        assert!(Decimal::parse("").is_zero());
        assert!(Decimal::parse("   ").is_zero());
        assert!(Decimal::parse("abc").is_zero());
        assert!(Decimal::parse("NaN").is_zero());
        assert!(Decimal::parse("Infinity").is_zero());
        assert!(Decimal::parse("-Infinity").is_zero());
    }

    #[test]
    fn test_from_f64_non_finite_normalizes_to_zero() {
        assert!(Decimal::from_f64(f64::NAN).is_zero());
        assert!(Decimal::from_f64(f64::INFINITY).is_zero());
        assert!(Decimal::from_f64(f64::NEG_INFINITY).is_zero());
    }

    #[test]
    fn test_basic_arithmetic() {
        let a = Decimal::parse("10.50");
        let b = Decimal::parse("2.25");
        assert_eq!(a.add(b).to_fixed(2), "12.75");
        assert_eq!(a.subtract(b).to_fixed(2), "8.25");
        assert_eq!(a.multiply(b).to_fixed(4), "23.6250");
    }

    #[test]
    fn test_overflow_collapses_to_zero() {
        let max = Decimal(Num::MAX);
        assert!(max.add(max).is_zero());
        assert!(max.multiply(max).is_zero());
        assert!(max.power(2).is_zero());
    }

    #[test]
    fn test_divide_exact() {
        let result = Decimal::parse("100").divide(Decimal::parse("4")).unwrap();
        assert_eq!(result.to_fixed(2), "25.00");
    }

    #[test]
    fn test_divide_by_zero_fails() {
        let err = Decimal::parse("100").divide(Decimal::ZERO).unwrap_err();
        assert!(matches!(err, DebtEngineError::DivisionByZero { .. }));
    }

    #[test]
    fn test_divide_overflow_fails_loudly() {
        let err = Decimal(Num::MAX)
            .divide(Decimal::parse("0.0000000000000001"))
            .unwrap_err();
        assert!(matches!(err, DebtEngineError::NonFiniteResult { .. }));
    }

    #[test]
    fn test_power_compound_factor() {
        // 1.02^12 ≈ 1.26824, the monthly factor behind a 24% annual rate
        let factor = Decimal::parse("1.02").power(12);
        assert_eq!(factor.to_fixed(5), "1.26824");
    }

    #[test]
    fn test_equality_tolerance() {
        let a = Decimal::parse("1.0000001");
        let b = Decimal::parse("1.0000002");
        assert!(a.is_equal(b));
        assert!(!a.is_equal(Decimal::parse("1.001")));
        assert!(Decimal::parse("0.0000001").is_zero());
    }

    #[test]
    fn test_ordering() {
        assert!(Decimal::parse("2").is_greater_than(Decimal::ONE));
        assert!(Decimal::ONE.is_less_than(Decimal::parse("2")));
        assert!(Decimal::parse("-5").is_negative());
        assert!(!Decimal::ZERO.is_negative());
    }

    #[test]
    fn test_to_fixed_rounds_midpoint_away_from_zero() {
        assert_eq!(Decimal::parse("2.005").to_fixed(2), "2.01");
        assert_eq!(Decimal::parse("-2.005").to_fixed(2), "-2.01");
        assert_eq!(Decimal::parse("25").to_fixed(2), "25.00");
    }

    #[test]
    fn test_display_defaults_to_two_decimals() {
        assert_eq!(Decimal::parse("1234.5").to_string(), "1234.50");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(
            format_currency(Decimal::parse("1234567.89"), true),
            "1.234.567,89 ₺"
        );
        assert_eq!(format_currency(Decimal::parse("1234567.89"), false), "1.234.567,89");
        assert_eq!(format_currency(Decimal::parse("-1500"), false), "-1.500,00");
        assert_eq!(format_currency(Decimal::parse("42"), false), "42,00");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(Decimal::parse("3.5")), "%3.50");
        assert_eq!(format_percentage(Decimal::ZERO), "%0.00");
    }

    #[test]
    fn test_serde_round_trips_as_string() {
        let value = Decimal::parse("1234.56");
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, "\"1234.56\"");
        let back: Decimal = serde_json::from_str(&json).unwrap();
        assert!(back.is_equal(value));
    }
}
