//! Monetary amounts and rates.
//!
//! Amounts are held as integer cents and rates as basis points, so every
//! rounding step is exact and reproducible. Rounding is half-up (half away
//! from zero) to two decimal places.
//!
//! Amounts stay within [`Money::MAX`], which keeps every value exactly
//! representable when it is written out as a JSON number.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::reservation::ValidationError;

const BASIS_POINTS_PER_UNIT: i128 = 10_000;

/// A monetary amount with cent precision.
///
/// # Examples
///
/// ```
/// use seatbook::Money;
///
/// let base: Money = "250.00".parse().unwrap();
/// assert_eq!(base.cents(), 25_000);
/// assert_eq!(base.to_string(), "250.00");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Zero.
    pub const ZERO: Self = Self(0);

    /// The largest amount a price or total may reach: 9 999 999 999 999.99.
    ///
    /// Fifteen significant digits fit an `f64` exactly.
    pub const MAX: Self = Self(999_999_999_999_999);

    /// Creates an amount from a number of cents.
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the amount in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Whether the amount is below zero.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Whether the amount lies within `-MAX..=MAX`.
    #[must_use]
    pub const fn in_range(self) -> bool {
        self.0 >= -Self::MAX.0 && self.0 <= Self::MAX.0
    }

    /// Adds two amounts, or returns `None` if the sum leaves `-MAX..=MAX`.
    ///
    /// # Examples
    ///
    /// ```
    /// use seatbook::Money;
    ///
    /// assert_eq!(Money::from_cents(100).checked_add(Money::from_cents(25)), Some(Money::from_cents(125)));
    /// assert_eq!(Money::MAX.checked_add(Money::from_cents(1)), None);
    /// ```
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0
            .checked_add(rhs.0)
            .map(Self)
            .filter(|sum| sum.in_range())
    }

    /// Multiplies the amount by `rate` and rounds half-up to the cent.
    ///
    /// # Examples
    ///
    /// ```
    /// use seatbook::{Money, Rate};
    ///
    /// let base = Money::from_cents(1_005);
    /// // 10.05 * 0.10 = 1.005 -> 1.01
    /// assert_eq!(base.apply_rate(Rate::from_basis_points(1_000).unwrap()).cents(), 101);
    /// ```
    #[must_use]
    pub fn apply_rate(self, rate: Rate) -> Self {
        let product = i128::from(self.0) * i128::from(rate.basis_points());
        let half = BASIS_POINTS_PER_UNIT / 2;
        let rounded = if product >= 0 {
            (product + half) / BASIS_POINTS_PER_UNIT
        } else {
            (product - half) / BASIS_POINTS_PER_UNIT
        };
        // |rounded| <= |self| because rate <= 1
        Self(i64::try_from(rounded).unwrap_or(self.0))
    }

    /// Converts a floating point amount, rounding half-up to the cent.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not finite or does not fit.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn try_from_f64(value: f64) -> Result<Self, ValidationError> {
        let cents = (value * 100.0).round();
        if !cents.is_finite() || cents.abs() > Self::MAX.0 as f64 {
            return Err(ValidationError {
                field: "amount".into(),
                message: format!("amount {value} is out of range"),
            });
        }
        Ok(Self(cents as i64))
    }

    /// Returns the amount as a floating point number of currency units.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl Add for Money {
    type Output = Self;

    /// Saturates at the `i64` bounds; use [`Money::checked_add`] where the
    /// result must stay within [`Money::MAX`].
    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl FromStr for Money {
    type Err = ValidationError;

    /// Parses `250`, `250.5` or `250.50`; more than two decimals is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError {
            field: "amount".into(),
            message: format!("'{s}' is not a valid amount (expected e.g. 250.00)"),
        };

        let trimmed = s.trim();
        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let (whole, frac) = digits.split_once('.').unwrap_or((digits, ""));
        if whole.is_empty()
            || frac.len() > 2
            || !whole.bytes().all(|b| b.is_ascii_digit())
            || !frac.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let whole: i64 = whole.parse().map_err(|_| invalid())?;
        let frac: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => frac.parse().map_err(|_| invalid())?,
        };
        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac))
            .ok_or_else(invalid)?;
        if cents > Self::MAX.0 {
            return Err(ValidationError {
                field: "amount".into(),
                message: format!("'{s}' exceeds the maximum amount {}", Self::MAX),
            });
        }

        Ok(Self(if negative { -cents } else { cents }))
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Self::try_from_f64(value).map_err(serde::de::Error::custom)
    }
}

/// A rate between 0 and 1, held in basis points.
///
/// # Examples
///
/// ```
/// use seatbook::Rate;
///
/// let rate = Rate::try_from_f64(0.10).unwrap();
/// assert_eq!(rate.basis_points(), 1_000);
/// assert_eq!(rate.to_string(), "10.00%");
/// assert!(Rate::try_from_f64(1.5).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rate(u32);

impl Rate {
    /// No discount or surcharge.
    pub const ZERO: Self = Self(0);
    /// The full amount.
    pub const ONE: Self = Self(10_000);

    /// Creates a rate from basis points (1/100 of a percent).
    ///
    /// # Errors
    ///
    /// Returns an error if the rate exceeds 10 000 basis points.
    pub fn from_basis_points(bp: u32) -> Result<Self, ValidationError> {
        if bp > 10_000 {
            return Err(ValidationError {
                field: "rate".into(),
                message: format!("{bp} basis points exceeds 100%"),
            });
        }
        Ok(Self(bp))
    }

    /// Creates a rate from a fraction such as `0.10`.
    ///
    /// # Errors
    ///
    /// Returns an error if the fraction is not within `0.0..=1.0`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn try_from_f64(fraction: f64) -> Result<Self, ValidationError> {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(ValidationError {
                field: "rate".into(),
                message: format!("rate {fraction} must be between 0 and 1"),
            });
        }
        Ok(Self((fraction * 10_000.0).round() as u32))
    }

    /// Returns the rate in basis points.
    #[must_use]
    pub const fn basis_points(self) -> u32 {
        self.0
    }

    /// Returns `1 - self`.
    #[must_use]
    pub const fn complement(self) -> Self {
        Self(10_000 - self.0)
    }

    /// Returns the rate as a fraction.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / 10_000.0
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}%", self.0 / 100, self.0 % 100)
    }
}

impl Serialize for Rate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for Rate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Self::try_from_f64(value).map_err(serde::de::Error::custom)
    }
}
