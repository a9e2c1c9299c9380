//! Money amount type.

use core::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`Amount`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum AmountError {
    /// The input is not a decimal number.
    #[error("amount must be a decimal number with at most 2 decimal places")]
    InvalidFormat,
    /// The input is negative.
    #[error("amount cannot be negative")]
    Negative,
    /// The input has more than two decimal places.
    #[error("amount must have at most 2 decimal places")]
    TooManyDecimals,
    /// Arithmetic overflowed.
    #[error("amount arithmetic overflowed")]
    Overflow,
}

/// A non-negative money amount with exactly two decimal places.
///
/// Serialized on the wire as a decimal string (`"2499.00"`), matching the
/// storefront's price format. Internally a [`Decimal`] rescaled to 2, so
/// `"2499"`, `"2499.0"` and `"2499.00"` all parse to the same value and
/// display as `2499.00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Amount(Decimal);

impl Amount {
    /// Zero rupees.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Parse an `Amount` from a decimal string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a decimal number, is negative,
    /// or carries more than two decimal places.
    pub fn parse(s: &str) -> Result<Self, AmountError> {
        let value = Decimal::from_str(s).map_err(|_| AmountError::InvalidFormat)?;

        if value.is_sign_negative() {
            return Err(AmountError::Negative);
        }

        if value.scale() > 2 {
            return Err(AmountError::TooManyDecimals);
        }

        let mut value = value;
        value.rescale(2);
        Ok(Self(value))
    }

    /// Build an amount from minor units (paise), e.g. `249_900` → `2499.00`.
    #[must_use]
    pub fn from_minor(minor: u32) -> Self {
        Self(Decimal::new(i64::from(minor), 2))
    }

    /// Returns the underlying decimal value.
    #[must_use]
    pub const fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Checked addition.
    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Checked multiplication by a line-item quantity.
    #[must_use]
    pub fn checked_mul(self, quantity: u32) -> Option<Self> {
        self.0.checked_mul(Decimal::from(quantity)).map(Self)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Scale is pinned to 2 in `parse`, so Display carries the cents.
        write!(f, "{}", self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Amount {
    type Error = AmountError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Amount> for String {
    fn from(amount: Amount) -> Self {
        amount.to_string()
    }
}
