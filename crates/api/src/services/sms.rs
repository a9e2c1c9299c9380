//! OTP delivery channel.
//!
//! The auth service only knows the [`OtpSender`] trait; swapping the
//! console sink for a real SMS provider is a construction-time decision in
//! `main`.

use thiserror::Error;

use charkha_core::{OtpCode, Phone};

/// Errors from the delivery channel.
#[derive(Debug, Error)]
pub enum SmsError {
    /// The provider rejected or failed the send.
    #[error("delivery failed: {0}")]
    Delivery(String),
}

/// Outbound OTP delivery.
///
/// Delivery is fire-and-forget from the caller's perspective: the auth
/// service logs a failure and still reports the OTP as sent.
pub trait OtpSender: Send + Sync {
    /// Deliver `code` to `phone`.
    ///
    /// # Errors
    ///
    /// Returns `SmsError` if the channel fails the send.
    fn send(&self, phone: &Phone, code: &OtpCode) -> Result<(), SmsError>;
}

/// Development sink that writes the OTP to the log instead of sending an
/// SMS. The storefront login screen tells testers to check the console.
pub struct ConsoleSms;

impl OtpSender for ConsoleSms {
    fn send(&self, phone: &Phone, code: &OtpCode) -> Result<(), SmsError> {
        tracing::info!(%phone, %code, "OTP issued (console delivery)");
        Ok(())
    }
}
