//! Auth routes: OTP login and profile.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use charkha_core::Phone;

use crate::error::{ApiError, Result};
use crate::middleware::CurrentUser;
use crate::models::UserResponse;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Request body for `POST /api/auth/request-otp`.
#[derive(Debug, Deserialize)]
pub struct RequestOtpBody {
    pub phone: String,
}

/// Response from `POST /api/auth/request-otp`.
///
/// Never carries the code itself; in development it is written to the
/// server log instead.
#[derive(Debug, Serialize)]
pub struct RequestOtpResponse {
    pub message: &'static str,
    pub phone: Phone,
}

/// Issue an OTP to a phone number, creating the user on first contact.
///
/// POST /api/auth/request-otp
///
/// # Errors
///
/// Returns 400 for a malformed phone number.
pub async fn request_otp(
    State(state): State<AppState>,
    Json(body): Json<RequestOtpBody>,
) -> Result<Json<RequestOtpResponse>> {
    let auth = AuthService::new(state.store(), state.tokens(), state.sms());
    let phone = auth.request_otp(&body.phone).await?;

    Ok(Json(RequestOtpResponse {
        message: "OTP sent successfully",
        phone,
    }))
}

/// Request body for `POST /api/auth/verify-otp`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpBody {
    pub phone: String,
    pub otp_code: String,
}

/// Response from `POST /api/auth/verify-otp`.
#[derive(Debug, Serialize)]
pub struct VerifyOtpResponse {
    pub user: UserResponse,
    pub token: String,
}

/// Exchange phone + OTP for the user and a bearer token.
///
/// POST /api/auth/verify-otp
///
/// # Errors
///
/// Returns 401 for a wrong, expired or already-used code.
pub async fn verify_otp(
    State(state): State<AppState>,
    Json(body): Json<VerifyOtpBody>,
) -> Result<Json<VerifyOtpResponse>> {
    let auth = AuthService::new(state.store(), state.tokens(), state.sms());
    let (user, token) = auth.verify_otp(&body.phone, &body.otp_code).await?;

    Ok(Json(VerifyOtpResponse {
        user: user.into(),
        token,
    }))
}

/// Request body for `PATCH /api/auth/profile`.
#[derive(Debug, Deserialize)]
pub struct ProfileBody {
    pub name: String,
    pub email: Option<String>,
}

/// Set or edit the caller's name and email.
///
/// PATCH /api/auth/profile
///
/// # Errors
///
/// Returns 400 for a name under two characters or a malformed email.
pub async fn update_profile(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Json(body): Json<ProfileBody>,
) -> Result<Json<UserResponse>> {
    let auth = AuthService::new(state.store(), state.tokens(), state.sms());
    let user = auth
        .complete_profile(caller.id, &body.name, body.email.as_deref())
        .await?;

    Ok(Json(user.into()))
}

/// Return the caller's profile.
///
/// GET /api/auth/me
///
/// # Errors
///
/// Returns 404 if the token's user id no longer resolves.
pub async fn me(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
) -> Result<Json<UserResponse>> {
    let user = state
        .store()
        .user(caller.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User".to_owned()))?;

    Ok(Json(user.into()))
}
