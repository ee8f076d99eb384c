//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) to avoid floating-point precision
//! issues. Provides safe arithmetic operations, tolerance comparison and
//! formatting.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
///
/// Using i64 cents avoids floating-point precision issues and supports
/// amounts up to approximately $92 quadrillion (both positive and negative).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Smallest difference that counts as a mismatch (0.01 currency units)
    pub const TOLERANCE: Money = Money(1);

    /// Largest magnitude `parse` accepts ($10 trillion), so sums of parsed
    /// amounts stay far from `i64` overflow
    pub const MAX_PARSED: Money = Money(1_000_000_000_000_000);

    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use envelope_reconcile::models::Money;
    /// let amount = Money::from_cents(1050); // $10.50
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from dollars and cents
    ///
    /// # Examples
    /// ```
    /// use envelope_reconcile::models::Money;
    /// let amount = Money::from_dollars_cents(10, 50); // $10.50
    /// ```
    pub const fn from_dollars_cents(dollars: i64, cents: i64) -> Self {
        Self(dollars * 100 + cents)
    }

    /// Create a Money amount from whole dollars
    pub const fn from_dollars(dollars: i64) -> Self {
        Self(dollars * 100)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole dollars portion (truncated toward zero)
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// True when the two amounts differ by less than [`Money::TOLERANCE`]
    pub fn within_tolerance(&self, other: Money) -> bool {
        (*self - other).abs() < Self::TOLERANCE
    }

    /// Divide into `parts` equal shares, each rounded toward zero to the cent
    ///
    /// The shares may sum to less than `self`; callers decide where the
    /// residual goes. Returns an empty vector when `parts` is zero.
    pub fn split_evenly(&self, parts: usize) -> Vec<Money> {
        if parts == 0 {
            return Vec::new();
        }
        let share = self.0 / parts as i64;
        vec![Money(share); parts]
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "$10.50", "-$10.50", "10", "1,200.00".
    /// Digits past the second decimal place are rounded half away from zero.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        // Handle negative sign at start
        let (negative, rest) = if let Some(stripped) = s.strip_prefix('-') {
            (true, stripped)
        } else {
            (false, s.strip_prefix('+').unwrap_or(s))
        };

        // Remove currency symbol and thousands separators
        let rest = rest.strip_prefix('$').unwrap_or(rest);
        let cleaned: String = rest.chars().filter(|c| *c != ',').collect();

        let invalid = || MoneyParseError::InvalidFormat(s.to_string());

        let (whole, fraction) = match cleaned.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (cleaned.as_str(), ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let dollars: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };

        let digits: Vec<i64> = fraction
            .bytes()
            .map(|b| i64::from(b - b'0'))
            .collect();
        let mut cents = digits.first().copied().unwrap_or(0) * 10
            + digits.get(1).copied().unwrap_or(0);
        if digits.get(2).copied().unwrap_or(0) >= 5 {
            cents += 1;
        }

        let total = dollars
            .checked_mul(100)
            .and_then(|d| d.checked_add(cents))
            .filter(|total| *total <= Self::MAX_PARSED.0)
            .ok_or_else(|| MoneyParseError::OutOfRange(s.to_string()))?;

        Ok(Self(if negative { -total } else { total }))
    }

    /// Plain decimal rendering without a currency symbol ("-100.00")
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!(
                "-{}{}.{:02}",
                symbol,
                self.dollars().abs(),
                self.cents_part()
            )
        } else {
            format!("{}{}.{:02}", symbol, self.dollars(), self.cents_part())
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self.format_with_symbol("$");
        f.pad(&rendered)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

impl std::str::FromStr for Money {
    type Err = MoneyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    Empty,
    InvalidFormat(String),
    OutOfRange(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::Empty => write!(f, "Amount is empty"),
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
            MoneyParseError::OutOfRange(s) => write!(f, "Amount out of range: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(1050);
        assert_eq!(m.cents(), 1050);
        assert_eq!(m.dollars(), 10);
        assert_eq!(m.cents_part(), 50);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1050)), "$10.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
        assert_eq!(format!("{}", Money::from_cents(-1050)), "-$10.50");
        assert_eq!(format!("{}", Money::from_cents(5)), "$0.05");
        assert_eq!(format!("{:>8}", Money::from_cents(5)), "   $0.05");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((-a).cents(), -1000);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("$10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("-10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse("-$10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse("10").unwrap().cents(), 1000);
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse("0.05").unwrap().cents(), 5);
        assert_eq!(Money::parse(".75").unwrap().cents(), 75);
        assert_eq!(Money::parse("1,200.00").unwrap().cents(), 120000);
    }

    #[test]
    fn test_parse_rounds_third_decimal() {
        assert_eq!(Money::parse("33.335").unwrap().cents(), 3334);
        assert_eq!(Money::parse("33.334").unwrap().cents(), 3333);
        assert_eq!(Money::parse("-0.005").unwrap().cents(), -1);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Money::parse("  "), Err(MoneyParseError::Empty));
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("1.2.3").is_err());
        assert!(Money::parse("12-4").is_err());
        assert!(Money::parse("$").is_err());
    }

    #[test]
    fn test_parse_caps_magnitude() {
        assert_eq!(Money::parse("10000000000000").unwrap(), Money::MAX_PARSED);
        assert_eq!(Money::parse("-10000000000000").unwrap(), -Money::MAX_PARSED);
        assert!(matches!(
            Money::parse("10000000000000.01"),
            Err(MoneyParseError::OutOfRange(_))
        ));
        assert!(matches!(
            Money::parse("92233720368547758.07"),
            Err(MoneyParseError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_tolerance() {
        let a = Money::from_cents(10000);
        assert!(a.within_tolerance(Money::from_cents(10000)));
        assert!(!a.within_tolerance(Money::from_cents(9999)));
        assert!(!a.within_tolerance(Money::from_cents(10001)));
    }

    #[test]
    fn test_split_evenly() {
        let parts = Money::from_dollars(100).split_evenly(3);
        assert_eq!(parts, vec![Money::from_cents(3333); 3]);
        assert!(Money::from_dollars(100).split_evenly(0).is_empty());
    }

    #[test]
    fn test_decimal_string() {
        assert_eq!(Money::from_cents(-10000).to_decimal_string(), "-100.00");
        assert_eq!(Money::from_cents(-5).to_decimal_string(), "-0.05");
        assert_eq!(Money::from_cents(1234).to_decimal_string(), "12.34");
    }

    #[test]
    fn test_sum() {
        let amounts = vec![
            Money::from_cents(100),
            Money::from_cents(200),
            Money::from_cents(300),
        ];
        let by_ref: Money = amounts.iter().sum();
        let total: Money = amounts.into_iter().sum();
        assert_eq!(total.cents(), 600);
        assert_eq!(by_ref, total);
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_cents(1050);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "1050");

        let deserialized: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, deserialized);
    }
}
