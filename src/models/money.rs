//! Fixed-point currency amounts
//!
//! `Money` counts cents in an `i64`, so balances never drift. On disk an
//! amount is a JSON number of whole units (`10.5`); reading rounds to the
//! nearest cent, which absorbs the error in files written with floats.
//!
//! Checked arithmetic and decoding stay within `±Money::MAX`. Every value in
//! that range survives the trip through an `f64` number of whole units.

use std::fmt;
use std::ops::Neg;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

const CENTS_PER_UNIT: i64 = 100;

/// An amount of money in cents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

/// Error returned by [`Money::parse`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyParseError {
    #[error("Invalid money format: {0}")]
    InvalidFormat(String),
}

impl Money {
    /// Largest magnitude produced by checked arithmetic or decoding:
    /// $10,000,000,000,000.00
    pub const MAX: Money = Money(1_000_000_000_000_000);

    /// ```
    /// use bankbook::models::Money;
    /// assert_eq!(Money::from_cents(1050).to_string(), "$10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    /// Round a whole-unit amount to the nearest cent
    ///
    /// `None` for NaN, infinities and anything beyond `±MAX`.
    pub fn from_major_units(units: f64) -> Option<Self> {
        let cents = (units * CENTS_PER_UNIT as f64).round();
        let limit = Self::MAX.0 as f64;
        // NaN fails the comparison
        (cents.abs() <= limit).then(|| Self(cents as i64))
    }

    pub fn to_major_units(&self) -> f64 {
        self.0 as f64 / CENTS_PER_UNIT as f64
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// `true` when `-MAX <= self <= MAX`
    pub fn in_range(&self) -> bool {
        self.0.unsigned_abs() <= Self::MAX.0.unsigned_abs()
    }

    /// Sum, or `None` outside `±MAX`
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .filter(Self::in_range)
    }

    /// Difference, or `None` outside `±MAX`
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0
            .checked_sub(other.0)
            .map(Self)
            .filter(Self::in_range)
    }

    /// Total of `amounts`, or `None` once it leaves `±MAX`
    pub fn checked_sum<I>(amounts: I) -> Option<Self>
    where
        I: IntoIterator<Item = Money>,
    {
        amounts
            .into_iter()
            .try_fold(Self::zero(), |total, amount| total.checked_add(amount))
    }

    /// Parse user input such as `12`, `12.5`, `-3.25`, `$10.00` or `1,250.00`
    ///
    /// Digits beyond the second decimal place are dropped.
    pub fn parse(input: &str) -> Result<Self, MoneyParseError> {
        let text = input.trim();
        let invalid = || MoneyParseError::InvalidFormat(text.to_string());

        let (negative, unsigned) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let digits: String = unsigned
            .strip_prefix('$')
            .unwrap_or(unsigned)
            .chars()
            .filter(|&c| c != ',')
            .collect();

        let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), ""));
        if !is_digits(whole) || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let fraction_cents = fraction
            .bytes()
            .chain(std::iter::repeat(b'0'))
            .take(2)
            .fold(0, |acc, b| acc * 10 + i64::from(b - b'0'));

        let cents = whole
            .parse::<i64>()
            .ok()
            .and_then(|w| w.checked_mul(CENTS_PER_UNIT))
            .and_then(|w| w.checked_add(fraction_cents))
            .ok_or_else(invalid)?;

        Ok(Self(if negative { -cents } else { cents }))
    }

    /// `-$10.50` style, with any symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let magnitude = self.0.unsigned_abs();
        let sign = if self.is_negative() { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            magnitude / CENTS_PER_UNIT as u64,
            magnitude % CENTS_PER_UNIT as u64
        )
    }

    /// `10.50` style, as used in CSV exports
    pub fn format_plain(&self) -> String {
        self.format_with_symbol("")
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.format_with_symbol("$"))
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_major_units().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let units = f64::deserialize(deserializer)?;
        Self::from_major_units(units)
            .ok_or_else(|| de::Error::custom(format_args!("amount out of range: {}", units)))
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(-self.0)
    }
}
