//! Phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PhoneError {
    /// The input string is empty.
    #[error("phone number cannot be empty")]
    Empty,
    /// The input does not match the expected format.
    #[error("phone number must be +91 followed by 10 digits")]
    InvalidFormat,
}

/// An Indian mobile phone number in E.164 form.
///
/// Phone numbers are the identity anchor for users, so they are validated
/// once at the edge and carried as this type everywhere else.
///
/// ## Constraints
///
/// - Must start with the `+91` country code
/// - Exactly 10 ASCII digits follow the country code
///
/// ## Examples
///
/// ```
/// use charkha_core::Phone;
///
/// assert!(Phone::parse("+919876543210").is_ok());
///
/// assert!(Phone::parse("").is_err());            // empty
/// assert!(Phone::parse("9876543210").is_err());  // missing country code
/// assert!(Phone::parse("+9198765").is_err());    // too short
/// assert!(Phone::parse("+91abcdefghij").is_err()); // non-digits
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Country code prefix for all accepted numbers.
    pub const COUNTRY_CODE: &'static str = "+91";

    /// Number of digits after the country code.
    pub const SUBSCRIBER_DIGITS: usize = 10;

    /// Parse a `Phone` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, does not start with `+91`,
    /// or is not followed by exactly 10 digits.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        if s.is_empty() {
            return Err(PhoneError::Empty);
        }

        let digits = s
            .strip_prefix(Self::COUNTRY_CODE)
            .ok_or(PhoneError::InvalidFormat)?;

        if digits.len() != Self::SUBSCRIBER_DIGITS
            || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(PhoneError::InvalidFormat);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the phone number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Phone` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Phone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
