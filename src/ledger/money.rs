use std::fmt;
use std::ops::{Add, Neg, Sub};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const MESSAGE_AMOUNT_CONSTRAINTS: &str =
    "Amount should be a non-negative number with exactly two digits after the decimal point, \
     and at most 21474836.47";

static AMOUNT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\d{2}$").expect("amount pattern is valid"));

/// Largest total a single loan may reach.
pub const MAX_AMOUNT: Money = Money(2_147_483_647);

/// Fixed-point money as a signed count of cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// Parses a literal such as `12.50`. Anything but digits, a dot and exactly
    /// two fractional digits is rejected, as is a value above `MAX_AMOUNT`.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if !AMOUNT_PATTERN.is_match(trimmed) {
            return None;
        }
        let (whole, fraction) = trimmed.split_once('.')?;
        let whole: i64 = whole.parse().ok()?;
        let fraction: i64 = fraction.parse().ok()?;
        let cents = whole.checked_mul(100)?.checked_add(fraction)?;
        let money = Self(cents);
        (money <= MAX_AMOUNT).then_some(money)
    }

    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let cents = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", cents / 100, cents % 100)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, value| acc + value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_exactly_two_decimals() {
        assert_eq!(Money::parse("12.50"), Some(Money::from_cents(1250)));
        assert_eq!(Money::parse("0.01"), Some(Money::from_cents(1)));
        assert_eq!(Money::parse(" 7.00 "), Some(Money::from_cents(700)));
        assert_eq!(Money::parse("12.5"), None);
        assert_eq!(Money::parse("12"), None);
        assert_eq!(Money::parse("12.505"), None);
        assert_eq!(Money::parse("-1.00"), None);
        assert_eq!(Money::parse("1e3.00"), None);
        assert_eq!(Money::parse(""), None);
    }

    #[test]
    fn rejects_values_above_maximum() {
        assert_eq!(Money::parse("21474836.47"), Some(MAX_AMOUNT));
        assert_eq!(Money::parse("21474836.48"), None);
        assert_eq!(Money::parse("99999999999999999999.00"), None);
    }

    #[test]
    fn displays_two_decimal_digits() {
        assert_eq!(Money::from_cents(5000).to_string(), "50.00");
        assert_eq!(Money::from_cents(7).to_string(), "0.07");
        assert_eq!(Money::from_cents(-2050).to_string(), "-20.50");
    }

    #[test]
    fn arithmetic_is_exact() {
        let total: Money = [10, 20, -5].into_iter().map(Money::from_cents).sum();
        assert_eq!(total, Money::from_cents(25));
        assert_eq!(-Money::from_cents(3), Money::from_cents(-3));
    }
}
