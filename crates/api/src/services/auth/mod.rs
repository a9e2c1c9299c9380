//! Phone/OTP authentication.
//!
//! The flow is two requests: `request_otp` issues a six-digit code to a
//! phone number (creating the user record on first contact), then
//! `verify_otp` exchanges phone + code for a signed bearer token. Profile
//! completion is a separate authenticated step so the login screen stays a
//! single input field.

mod error;
pub mod token;

pub use error::AuthError;
pub use token::{Claims, TokenError, TokenService};

use chrono::{Duration, Utc};
use rand::Rng;

use charkha_core::{Email, OtpCode, Phone, UserId};

use crate::models::User;
use crate::services::sms::OtpSender;
use crate::store::{Storage, StoreError};

/// How long an issued OTP stays valid.
const OTP_VALIDITY_MINUTES: i64 = 10;

/// Minimum display-name length after trimming.
const MIN_NAME_LEN: usize = 2;

/// Drives the OTP login flow against the store and delivery channel.
///
/// Borrowed per request from [`crate::state::AppState`]; holds no state of
/// its own.
pub struct AuthService<'a> {
    store: &'a dyn Storage,
    tokens: &'a TokenService,
    sms: &'a dyn OtpSender,
}

impl<'a> AuthService<'a> {
    #[must_use]
    pub const fn new(
        store: &'a dyn Storage,
        tokens: &'a TokenService,
        sms: &'a dyn OtpSender,
    ) -> Self {
        Self { store, tokens, sms }
    }

    /// Issue a fresh OTP to `phone`, creating the user on first contact.
    ///
    /// A repeat request overwrites any outstanding code. Delivery is
    /// fire-and-forget: a channel failure is logged and the issuance still
    /// succeeds, so a flaky SMS provider cannot take down login.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidPhone` for a malformed number, or a
    /// store error.
    pub async fn request_otp(&self, phone: &str) -> Result<Phone, AuthError> {
        let phone = Phone::parse(phone)?;

        if self.store.user_by_phone(&phone).await?.is_none() {
            match self.store.create_user(phone.clone()).await {
                Ok(_) => {}
                // Lost a create race; the row exists, which is all we need.
                Err(StoreError::Conflict(_)) => {}
                Err(e) => return Err(e.into()),
            }
        }

        let code = OtpCode::from_number(rand::rng().random_range(0..1_000_000));
        let expires_at = Utc::now() + Duration::minutes(OTP_VALIDITY_MINUTES);
        self.store.set_otp(&phone, code.clone(), expires_at).await?;

        if let Err(e) = self.sms.send(&phone, &code) {
            tracing::warn!(%phone, error = %e, "OTP delivery failed");
        }

        Ok(phone)
    }

    /// Exchange phone + code for the user and a signed bearer token.
    ///
    /// The code is single-use: verification clears it. A wrong code and an
    /// expired one produce the same error.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidOrExpiredOtp` on any mismatch, format
    /// errors for malformed inputs, or a store/signing error.
    pub async fn verify_otp(&self, phone: &str, code: &str) -> Result<(User, String), AuthError> {
        let phone = Phone::parse(phone)?;
        let code = OtpCode::parse(code)?;

        let user = self
            .store
            .verify_and_clear_otp(&phone, &code, Utc::now())
            .await?
            .ok_or(AuthError::InvalidOrExpiredOtp)?;

        let token = self.tokens.issue(&user)?;
        Ok((user, token))
    }

    /// Set or edit the authenticated user's name and optional email.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidName` if the trimmed name is shorter
    /// than two characters, `AuthError::InvalidEmail` for a malformed
    /// email, or `AuthError::UserNotFound`.
    pub async fn complete_profile(
        &self,
        user_id: UserId,
        name: &str,
        email: Option<&str>,
    ) -> Result<User, AuthError> {
        let name = name.trim();
        if name.chars().count() < MIN_NAME_LEN {
            return Err(AuthError::InvalidName(
                "name must be at least 2 characters".to_owned(),
            ));
        }

        let email = email
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Email::parse)
            .transpose()?;

        match self.store.update_profile(user_id, name.to_owned(), email).await {
            Ok(user) => Ok(user),
            Err(StoreError::NotFound) => Err(AuthError::UserNotFound),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;

    use crate::services::sms::testing::RecordingSms;
    use crate::store::MemStore;

    use super::*;

    fn tokens() -> TokenService {
        TokenService::new(&SecretString::from(
            "k9#mP2$vL8@qR5!wX3^zB7&nF4*jH6supercharged",
        ))
    }

    #[tokio::test]
    async fn test_request_otp_creates_user_and_delivers() {
        let store = MemStore::new();
        let tokens = tokens();
        let sms = RecordingSms::default();
        let auth = AuthService::new(&store, &tokens, &sms);

        let phone = auth.request_otp("+919876543210").await.unwrap();
        assert_eq!(phone.as_str(), "+919876543210");

        let user = store.user_by_phone(&phone).await.unwrap().unwrap();
        assert!(!user.is_registered());
        assert!(user.otp_code.is_some());

        let sent = sms.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(&sent[0].1, user.otp_code.as_ref().unwrap());
    }

    #[tokio::test]
    async fn test_request_otp_rejects_malformed_phone() {
        let store = MemStore::new();
        let tokens = tokens();
        let sms = RecordingSms::default();
        let auth = AuthService::new(&store, &tokens, &sms);

        assert!(matches!(
            auth.request_otp("9876543210").await,
            Err(AuthError::InvalidPhone(_))
        ));
        // No user row for input that never validated.
        let phone = Phone::parse("+919876543210").unwrap();
        assert!(store.user_by_phone(&phone).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_request_otp_survives_delivery_failure() {
        let store = MemStore::new();
        let tokens = tokens();
        let sms = RecordingSms {
            fail: true,
            ..RecordingSms::default()
        };
        let auth = AuthService::new(&store, &tokens, &sms);

        // Issuance succeeds even though the channel is down.
        auth.request_otp("+919876543210").await.unwrap();
        let phone = Phone::parse("+919876543210").unwrap();
        let user = store.user_by_phone(&phone).await.unwrap().unwrap();
        assert!(user.otp_code.is_some());
    }

    #[tokio::test]
    async fn test_verify_otp_issues_token() {
        let store = MemStore::new();
        let tokens = tokens();
        let sms = RecordingSms::default();
        let auth = AuthService::new(&store, &tokens, &sms);

        auth.request_otp("+919876543210").await.unwrap();
        let code = {
            let sent = sms.sent.lock().unwrap();
            sent[0].1.clone()
        };

        let (user, token) = auth.verify_otp("+919876543210", code.as_str()).await.unwrap();
        assert_eq!(user.phone.as_str(), "+919876543210");

        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.sub, user.id);
        assert!(!claims.is_admin);
    }

    #[tokio::test]
    async fn test_verify_otp_wrong_code() {
        let store = MemStore::new();
        let tokens = tokens();
        let sms = RecordingSms::default();
        let auth = AuthService::new(&store, &tokens, &sms);

        auth.request_otp("+919876543210").await.unwrap();
        let issued = sms.sent.lock().unwrap()[0].1.clone();
        let wrong = if issued.as_str() == "000000" {
            "000001"
        } else {
            "000000"
        };

        assert!(matches!(
            auth.verify_otp("+919876543210", wrong).await,
            Err(AuthError::InvalidOrExpiredOtp)
        ));
        // The right code still works after a failed attempt.
        assert!(auth.verify_otp("+919876543210", issued.as_str()).await.is_ok());
    }

    #[tokio::test]
    async fn test_verify_otp_single_use() {
        let store = MemStore::new();
        let tokens = tokens();
        let sms = RecordingSms::default();
        let auth = AuthService::new(&store, &tokens, &sms);

        auth.request_otp("+919876543210").await.unwrap();
        let code = sms.sent.lock().unwrap()[0].1.clone();

        auth.verify_otp("+919876543210", code.as_str()).await.unwrap();
        assert!(matches!(
            auth.verify_otp("+919876543210", code.as_str()).await,
            Err(AuthError::InvalidOrExpiredOtp)
        ));
    }

    #[tokio::test]
    async fn test_verify_otp_unknown_phone() {
        let store = MemStore::new();
        let tokens = tokens();
        let sms = RecordingSms::default();
        let auth = AuthService::new(&store, &tokens, &sms);

        assert!(matches!(
            auth.verify_otp("+919876543210", "123456").await,
            Err(AuthError::InvalidOrExpiredOtp)
        ));
    }

    #[tokio::test]
    async fn test_complete_profile() {
        let store = MemStore::new();
        let tokens = tokens();
        let sms = RecordingSms::default();
        let auth = AuthService::new(&store, &tokens, &sms);

        auth.request_otp("+919876543210").await.unwrap();
        let phone = Phone::parse("+919876543210").unwrap();
        let id = store.user_by_phone(&phone).await.unwrap().unwrap().id;

        let user = auth
            .complete_profile(id, "  Asha  ", Some("asha@example.com"))
            .await
            .unwrap();
        assert_eq!(user.name.as_deref(), Some("Asha"));
        assert!(user.email.is_some());
        assert!(user.is_registered());
    }

    #[tokio::test]
    async fn test_complete_profile_rejects_short_name() {
        let store = MemStore::new();
        let tokens = tokens();
        let sms = RecordingSms::default();
        let auth = AuthService::new(&store, &tokens, &sms);

        auth.request_otp("+919876543210").await.unwrap();
        let phone = Phone::parse("+919876543210").unwrap();
        let id = store.user_by_phone(&phone).await.unwrap().unwrap().id;

        assert!(matches!(
            auth.complete_profile(id, " A ", None).await,
            Err(AuthError::InvalidName(_))
        ));
        assert!(matches!(
            auth.complete_profile(id, "Asha", Some("not-an-email")).await,
            Err(AuthError::InvalidEmail(_))
        ));
    }

    #[tokio::test]
    async fn test_complete_profile_unknown_user() {
        let store = MemStore::new();
        let tokens = tokens();
        let sms = RecordingSms::default();
        let auth = AuthService::new(&store, &tokens, &sms);

        assert!(matches!(
            auth.complete_profile(UserId::generate(), "Asha", None).await,
            Err(AuthError::UserNotFound)
        ));
    }
}
