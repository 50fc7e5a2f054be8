//! Money type for representing monetary values.
//!
//! Amounts are stored as whole cents. Conversion from `f64` rounds the way
//! a browser storefront formats prices with `toFixed(2)`: the exact binary
//! value is rounded to the nearest hundredth and exact ties go away from
//! zero. Totals computed here therefore match the ones a shopper saw.

use std::fmt;
use std::ops::Add;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CommerceError;

/// Largest magnitude accepted by [`Money::from_decimal`].
pub const MAX_DECIMAL_AMOUNT: f64 = 1e15;

/// A monetary value with two fraction digits.
///
/// Serializes as a decimal string (`"74.92"`); deserializes from either a
/// string or a JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money {
    amount_cents: i64,
}

impl Money {
    /// Zero.
    pub const ZERO: Money = Money { amount_cents: 0 };

    /// Create a Money value from cents.
    pub const fn from_cents(amount_cents: i64) -> Self {
        Self { amount_cents }
    }

    /// Amount in cents.
    pub fn cents(&self) -> i64 {
        self.amount_cents
    }

    /// Round a floating-point amount to cents.
    ///
    /// ```
    /// use shopfront_commerce::money::Money;
    /// assert_eq!(Money::from_decimal(4.1000000000000005).unwrap().display_amount(), "4.10");
    /// assert_eq!(Money::from_decimal(1.125).unwrap().display_amount(), "1.13");
    /// ```
    pub fn from_decimal(amount: f64) -> Result<Self, CommerceError> {
        if !amount.is_finite() || amount.abs() >= MAX_DECIMAL_AMOUNT {
            return Err(CommerceError::AmountOutOfRange(amount));
        }

        // A double sits exactly between two hundredths iff it is an odd
        // multiple of 1/8. Scaling by 8 is exact.
        let eighths = amount * 8.0;
        if eighths.fract() == 0.0 {
            let eighths = eighths as i64;
            if eighths % 2 != 0 {
                // 12.5 * eighths, rounded away from zero, in integers.
                return Ok(Self::from_cents((25 * eighths + eighths.signum()) / 2));
            }
        }

        // Not a tie: the correctly rounded 2-digit rendering is the answer.
        format!("{:.2}", amount).parse()
    }

    /// Convert to the nearest `f64`, as `Number("74.92")` would.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / 100.0
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount_cents < 0
    }

    /// Format with a currency sign (e.g., "$49.99").
    pub fn display(&self) -> String {
        if self.is_negative() {
            format!("-${}", Money::from_cents(-self.amount_cents).display_amount())
        } else {
            format!("${}", self.display_amount())
        }
    }

    /// Format without a sign symbol, always with two fraction digits.
    pub fn display_amount(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let abs = self.amount_cents.unsigned_abs();
        format!("{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money::from_cents(self.amount_cents.saturating_add(other.amount_cents))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl FromStr for Money {
    type Err = CommerceError;

    /// Parse `"12"`, `"12.5"` or `"12.50"`. More than two fraction digits
    /// is rejected rather than silently rounded.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CommerceError::InvalidAmount(s.to_string());

        let trimmed = s.trim();
        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let (whole, frac) = digits.split_once('.').unwrap_or((digits, ""));

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && frac.is_empty())
            || frac.len() > 2
            || !all_digits(whole)
            || !all_digits(frac)
        {
            return Err(invalid());
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| CommerceError::Overflow)?
        };
        let frac: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => frac.parse().map_err(|_| invalid())?,
        };

        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac))
            .ok_or(CommerceError::Overflow)?;

        Ok(Money::from_cents(if negative { -cents } else { cents }))
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.display_amount())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

struct MoneyVisitor;

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal amount as a string or number")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        Money::from_decimal(v).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        v.checked_mul(100)
            .map(Money::from_cents)
            .ok_or_else(|| E::custom(CommerceError::Overflow))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        i64::try_from(v)
            .ok()
            .and_then(|v| v.checked_mul(100))
            .map(Money::from_cents)
            .ok_or_else(|| E::custom(CommerceError::Overflow))
    }
}
