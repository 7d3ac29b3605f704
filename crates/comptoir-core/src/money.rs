//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004                                      │
//! │                                                                         │
//! │  Summing a week of sale totals in floats drifts by fractions of a      │
//! │  centime, and the dashboard no longer matches the sale history.        │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units (centimes)                           │
//! │    arithmetic in i64, decimal only at the JSON boundary                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## JSON Form
//! Persisted records store prices as plain decimal numbers in major units
//! (`"salePrice": 100`, `"total": 12.5`). `Money` serializes to that form and
//! rounds to the nearest centime when reading it back.
//!
//! ## Usage
//! ```rust
//! use comptoir_core::money::Money;
//!
//! let price = Money::from_major(100);       // 100.00
//! let total = price.multiply_quantity(2);   // 200.00
//! assert_eq!(total.cents(), 20_000);
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

/// Minor units per major unit.
const MINOR_PER_MAJOR: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit.
///
/// Signed: profits go negative when an item sells below its purchase price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, TS)]
#[ts(export)]
pub struct Money(#[ts(type = "number")] i64);

impl Money {
    /// Creates a Money value from minor units.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole major units.
    ///
    /// ```rust
    /// use comptoir_core::money::Money;
    ///
    /// assert_eq!(Money::from_major(60).cents(), 6_000);
    /// ```
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major.saturating_mul(MINOR_PER_MAJOR))
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity, saturating at the `i64` bounds.
    ///
    /// For read-only figures (dashboard). Anything that gets recorded goes
    /// through [`Money::checked_multiply_quantity`].
    ///
    /// ## User Workflow
    /// ```text
    /// Product: Cola 100.00
    /// Quantity: 3
    ///      │
    ///      ▼
    /// multiply_quantity(3) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Sale total: 300.00
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Multiplies money by a quantity, `None` on overflow.
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(v) => Some(Money(v)),
            None => None,
        }
    }

    /// Adds two amounts, `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Money(v)),
            None => None,
        }
    }

    /// Subtracts two amounts, `None` on overflow.
    #[inline]
    pub const fn checked_sub(&self, other: Money) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Money(v)),
            None => None,
        }
    }

    /// Value in major units as a float, for the JSON boundary only.
    fn as_major_f64(&self) -> f64 {
        self.0 as f64 / MINOR_PER_MAJOR as f64
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================
//
// Operators saturate at the `i64` bounds instead of wrapping.

/// Debug-style rendering (`-12.50`); the UI owns currency formatting.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let minor = MINOR_PER_MAJOR as u64;
        write!(
            f,
            "{}{}.{:02}",
            sign,
            abs / minor,
            abs % minor
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Parses a decimal amount in major units (`12`, `12.5`, `-0.99`).
///
/// At most two decimals; parsing is exact, no float rounding involved.
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: reason.to_string(),
        };

        let s = s.trim();
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));

        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("expected a decimal number"));
        }
        if fraction.len() > 2 || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("at most two decimals"));
        }

        let whole: i64 = whole
            .parse()
            .map_err(|_| invalid("amount out of range"))?;
        let fraction: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid("bad decimals"))? * 10,
            _ => fraction.parse().map_err(|_| invalid("bad decimals"))?,
        };

        let cents = whole
            .checked_mul(MINOR_PER_MAJOR)
            .and_then(|c| c.checked_add(fraction))
            .ok_or_else(|| invalid("amount out of range"))?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

/// Whole amounts serialize as integers (`100`), others as decimals (`12.5`).
impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % MINOR_PER_MAJOR == 0 {
            serializer.serialize_i64(self.0 / MINOR_PER_MAJOR)
        } else {
            serializer.serialize_f64(self.as_major_f64())
        }
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let major = f64::deserialize(deserializer)?;
        if !major.is_finite() {
            return Err(serde::de::Error::custom("amount must be a finite number"));
        }
        Ok(Money((major * MINOR_PER_MAJOR as f64).round() as i64))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_major() {
        let money = Money::from_major(100);
        assert_eq!(money.cents(), 10_000);
        assert!(!money.is_zero());
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_major(5).to_string(), "5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_major(100);
        let b = Money::from_major(60);

        assert_eq!((a - b).multiply_quantity(2), Money::from_major(80));
        assert_eq!(a + b, Money::from_major(160));
        assert!((b - a).is_negative());

        let total: Money = [a, b, b].iter().sum();
        assert_eq!(total, Money::from_major(220));
    }

    #[test]
    fn test_checked_arithmetic() {
        let price = Money::from_cents(i64::MAX / 2 + 1);
        assert_eq!(price.checked_multiply_quantity(2), None);
        assert_eq!(
            Money::from_major(100).checked_multiply_quantity(3),
            Some(Money::from_major(300))
        );
        assert_eq!(price.checked_add(price), None);
        assert_eq!(Money::from_cents(i64::MIN).checked_sub(Money::from_cents(1)), None);
    }

    #[test]
    fn test_operators_saturate() {
        let huge = Money::from_cents(i64::MAX);
        assert_eq!(huge + Money::from_cents(1), huge);
        assert_eq!(huge.multiply_quantity(2), huge);
        assert_eq!(Money::from_cents(i64::MIN) - Money::from_cents(1), Money::from_cents(i64::MIN));

        let total: Money = [huge, huge].iter().sum();
        assert_eq!(total, huge);

        assert_eq!(Money::from_cents(i64::MIN).to_string(), "-92233720368547758.08");
    }

    #[test]
    fn test_parse() {
        assert_eq!("12".parse::<Money>().unwrap(), Money::from_major(12));
        assert_eq!("12.5".parse::<Money>().unwrap(), Money::from_cents(1250));
        assert_eq!("0.07".parse::<Money>().unwrap(), Money::from_cents(7));
        assert_eq!("-3.10".parse::<Money>().unwrap(), Money::from_cents(-310));
        assert!("".parse::<Money>().is_err());
        assert!("1.234".parse::<Money>().is_err());
        assert!("abc".parse::<Money>().is_err());
        assert!(".5".parse::<Money>().is_err());
    }

    #[test]
    fn test_json_uses_decimal_major_units() {
        assert_eq!(serde_json::to_string(&Money::from_major(100)).unwrap(), "100");
        assert_eq!(serde_json::to_string(&Money::from_cents(1250)).unwrap(), "12.5");
    }

    #[test]
    fn test_json_reads_integers_and_decimals() {
        let whole: Money = serde_json::from_str("250").unwrap();
        assert_eq!(whole, Money::from_major(250));

        let decimal: Money = serde_json::from_str("19.99").unwrap();
        assert_eq!(decimal.cents(), 1999);

        let negative: Money = serde_json::from_str("-4.5").unwrap();
        assert_eq!(negative.cents(), -450);

        assert!(serde_json::from_str::<Money>("\"ten\"").is_err());
    }
}
