//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are amounts of the store currency (Zorkmids, shown as `Zm`).
//! On the wire a price is a plain JSON number: whole amounts serialize as
//! integers (`21`), fractional ones as floats (`9.5`).
//!
//! Amounts are capped at [`MAX_AMOUNT`] and [`MAX_SIGNIFICANT_DIGITS`] so
//! every price survives the trip through a JSON number unchanged.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;
use core::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Currency suffix used when displaying prices.
pub const CURRENCY_SYMBOL: &str = "Zm";

/// Largest accepted amount, below 2^53 so whole prices are exact JSON numbers.
pub const MAX_AMOUNT: i64 = 999_999_999_999_999;

/// Most significant digits a price may carry. An `f64` holds any decimal
/// of this many digits exactly.
pub const MAX_SIGNIFICANT_DIGITS: u32 = 15;

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),
    /// The input is not a decimal number.
    #[error("invalid price: {0}")]
    Invalid(String),
    /// The amount is above [`MAX_AMOUNT`].
    #[error("price {0} exceeds the maximum of {MAX_AMOUNT}")]
    TooLarge(Decimal),
    /// The amount has more than [`MAX_SIGNIFICANT_DIGITS`] significant digits.
    #[error("price {0} has more than {MAX_SIGNIFICANT_DIGITS} significant digits")]
    TooPrecise(Decimal),
}

/// A non-negative amount in the store currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero,
    /// [`PriceError::TooLarge`] above [`MAX_AMOUNT`], and
    /// [`PriceError::TooPrecise`] past [`MAX_SIGNIFICANT_DIGITS`].
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        if amount > Decimal::from(MAX_AMOUNT) {
            return Err(PriceError::TooLarge(amount));
        }
        if significant_digits(amount) > MAX_SIGNIFICANT_DIGITS {
            return Err(PriceError::TooPrecise(amount));
        }
        Ok(Self(amount))
    }

    /// Create a price from a whole number of Zorkmids.
    #[must_use]
    pub fn whole(amount: u32) -> Self {
        Self(Decimal::from(amount))
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

fn significant_digits(amount: Decimal) -> u32 {
    amount
        .normalize()
        .mantissa()
        .unsigned_abs()
        .checked_ilog10()
        .map_or(1, |digits| digits + 1)
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {CURRENCY_SYMBOL}", self.0.normalize())
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount =
            Decimal::from_str(s.trim()).map_err(|_| PriceError::Invalid(s.to_string()))?;
        Self::new(amount)
    }
}

impl Add for Price {
    type Output = Self;

    /// Totals saturate instead of overflowing.
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Self> for Price {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::Error as _;

        let amount = self.0.normalize();
        if let (0, Some(whole)) = (amount.scale(), amount.to_i64()) {
            return serializer.serialize_i64(whole);
        }

        // Float parsing rounds correctly, so the shortest form printed back
        // is the decimal itself.
        amount
            .to_string()
            .parse::<f64>()
            .map_err(|_| S::Error::custom(format!("price {amount} is out of range")))
            .and_then(|value| serializer.serialize_f64(value))
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error as _;

        let amount = <Decimal as Deserialize>::deserialize(deserializer)?;
        Self::new(amount).map_err(D::Error::custom)
    }
}
