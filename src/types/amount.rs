//! Signed big-integer amounts for value comparisons
//!
//! Ledger values arrive as decimal strings that routinely exceed the 64-bit
//! range (an 18-decimal token moving a few billion units is already past
//! `i64::MAX`). `LedgerAmount` wraps an arbitrary-precision `BigInt` so that
//! thresholds and stored values compare exactly at any size.

use num_bigint::{BigInt, Sign};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Reasons a decimal string is not a valid amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AmountParseError {
    /// Nothing to parse (empty string or a lone sign)
    #[error("empty number")]
    Empty,

    /// A character other than an ASCII digit after the optional sign
    #[error("invalid digit")]
    InvalidDigit,
}

/// An arbitrary-precision signed integer
///
/// Parsing follows the usual integer syntax: an optional `+` or `-`, then
/// one or more ASCII digits. No whitespace, no underscores, no exponent, no
/// fraction. Negative zero is normalized to zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LedgerAmount(BigInt);

impl LedgerAmount {
    /// Zero
    pub fn zero() -> Self {
        Self::default()
    }

    /// Build a non-negative amount from a machine integer
    pub fn from_u128(value: u128) -> Self {
        Self(BigInt::from(value))
    }

    /// Whether the amount is strictly below zero
    pub fn is_negative(&self) -> bool {
        self.0.sign() == Sign::Minus
    }

    /// Underlying big integer
    pub fn as_bigint(&self) -> &BigInt {
        &self.0
    }
}

impl FromStr for LedgerAmount {
    type Err = AmountParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix('-')
            .or_else(|| s.strip_prefix('+'))
            .unwrap_or(s);

        if digits.is_empty() {
            return Err(AmountParseError::Empty);
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AmountParseError::InvalidDigit);
        }

        // Syntax is checked above; BigInt alone would also accept underscores
        BigInt::from_str(s)
            .map(Self)
            .map_err(|_| AmountParseError::InvalidDigit)
    }
}

impl From<BigInt> for LedgerAmount {
    fn from(value: BigInt) -> Self {
        Self(value)
    }
}

impl fmt::Display for LedgerAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn amount(s: &str) -> LedgerAmount {
        s.parse().unwrap()
    }

    #[rstest]
    #[case("0", "0")]
    #[case("42", "42")]
    #[case("+42", "42")]
    #[case("-42", "-42")]
    #[case("-0", "0")]
    #[case("007", "7")]
    #[case("115792089237316195423570985008687907853269984665640564039457584007913129639936", "115792089237316195423570985008687907853269984665640564039457584007913129639936")]
    fn test_parse_valid(#[case] input: &str, #[case] rendered: &str) {
        assert_eq!(amount(input).to_string(), rendered);
    }

    #[rstest]
    #[case::empty("", AmountParseError::Empty)]
    #[case::lone_sign("-", AmountParseError::Empty)]
    #[case::letters("12a", AmountParseError::InvalidDigit)]
    #[case::fraction("1.5", AmountParseError::InvalidDigit)]
    #[case::exponent("1e18", AmountParseError::InvalidDigit)]
    #[case::whitespace(" 10", AmountParseError::InvalidDigit)]
    #[case::double_sign("--1", AmountParseError::InvalidDigit)]
    #[case::underscore("1_000", AmountParseError::InvalidDigit)]
    #[case::hex("0x10", AmountParseError::InvalidDigit)]
    fn test_parse_invalid(#[case] input: &str, #[case] expected: AmountParseError) {
        assert_eq!(input.parse::<LedgerAmount>(), Err(expected));
    }

    #[test]
    fn test_values_beyond_i64_compare_exactly() {
        // 2^63 and 2^63 + 1 both overflow i64
        let a = amount("9223372036854775808");
        let b = amount("9223372036854775809");
        assert!(b > a);
        assert!(a > amount("9223372036854775807"));
    }

    #[test]
    fn test_values_beyond_256_bits_compare_exactly() {
        let huge = format!("1{}", "0".repeat(80));
        let bigger = format!("1{}1", "0".repeat(79));
        assert!(amount(&bigger) > amount(&huge));
        assert!(amount(&huge) > amount("5"));
        assert!(amount(&format!("-{}", huge)) < amount("-5"));
    }

    #[rstest]
    #[case("-5", "-3")]
    #[case("-1", "0")]
    #[case("0", "1")]
    #[case("-100", "1")]
    #[case("99", "100")]
    fn test_ordering(#[case] smaller: &str, #[case] larger: &str) {
        assert!(amount(smaller) < amount(larger));
        assert!(amount(larger) > amount(smaller));
    }

    #[test]
    fn test_negative_zero_equals_zero() {
        assert_eq!(amount("-0"), LedgerAmount::zero());
        assert!(!amount("-0").is_negative());
        assert!(amount("-1").is_negative());
    }

    #[test]
    fn test_from_u128() {
        assert_eq!(LedgerAmount::from_u128(10), amount("10"));
        assert_eq!(LedgerAmount::from_u128(10).as_bigint(), &BigInt::from(10u8));
    }
}
