//! One-time password code type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`OtpCode`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum OtpCodeError {
    /// The input is not exactly six ASCII digits.
    #[error("OTP code must be exactly 6 digits")]
    InvalidFormat,
}

/// A six-digit one-time password.
///
/// Stored as a string so leading zeros survive (code `042917` must compare
/// equal to what was delivered, not to `42917`). Comparison is exact and the
/// code is single-use: the store clears it on successful verification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct OtpCode(String);

impl OtpCode {
    /// Number of digits in a code.
    pub const LENGTH: usize = 6;

    /// Parse an `OtpCode` from a string.
    ///
    /// # Errors
    ///
    /// Returns `OtpCodeError::InvalidFormat` unless the input is exactly
    /// six ASCII digits.
    pub fn parse(s: &str) -> Result<Self, OtpCodeError> {
        if s.len() != Self::LENGTH || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(OtpCodeError::InvalidFormat);
        }
        Ok(Self(s.to_owned()))
    }

    /// Build a code from a number in `0..1_000_000`, zero-padded to six
    /// digits. Values outside the range are reduced modulo one million.
    #[must_use]
    pub fn from_number(n: u32) -> Self {
        Self(format!("{:06}", n % 1_000_000))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for OtpCode {
    type Err = OtpCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert!(OtpCode::parse("123456").is_ok());
        assert!(OtpCode::parse("000000").is_ok());
    }

    #[test]
    fn test_parse_invalid() {
        assert!(OtpCode::parse("").is_err());
        assert!(OtpCode::parse("12345").is_err());
        assert!(OtpCode::parse("1234567").is_err());
        assert!(OtpCode::parse("12345a").is_err());
    }

    #[test]
    fn test_from_number_pads_leading_zeros() {
        assert_eq!(OtpCode::from_number(42).as_str(), "000042");
        assert_eq!(OtpCode::from_number(999_999).as_str(), "999999");
    }

    #[test]
    fn test_from_number_wraps() {
        assert_eq!(OtpCode::from_number(1_000_000).as_str(), "000000");
    }

    #[test]
    fn test_exact_comparison() {
        let a = OtpCode::parse("042917").unwrap();
        let b = OtpCode::parse("42917 ").map(|_| ()).is_err();
        assert!(b);
        assert_eq!(a, OtpCode::from_number(42_917));
    }
}
