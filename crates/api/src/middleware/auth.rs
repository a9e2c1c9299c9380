//! Bearer-token extractors.
//!
//! Identity is decoded entirely from the token claims; no store lookup
//! happens per request. Handlers opt into access control by taking
//! [`CurrentUser`] or [`RequireAdmin`] as an argument.

use axum::{extract::FromRequestParts, http::header, http::request::Parts};

use charkha_core::{Phone, UserId};

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated caller, as attested by the token signature.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: UserId,
    pub phone: Phone,
    pub is_admin: bool,
}

/// Extractor rejecting requests without a valid bearer token.
///
/// Missing or non-Bearer `Authorization` is `Unauthenticated`; a present
/// but unverifiable token is `InvalidCredential`. Both render as 401.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub AuthUser);

/// Extractor additionally requiring the admin role (403 otherwise).
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AuthUser);

fn authenticate(parts: &Parts, state: &AppState) -> Result<AuthUser, ApiError> {
    let token = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(ApiError::Unauthenticated)?;

    let claims = state
        .tokens()
        .verify(token)
        .map_err(|_| ApiError::InvalidCredential)?;

    Ok(AuthUser {
        id: claims.sub,
        phone: claims.phone,
        is_admin: claims.is_admin,
    })
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authenticate(parts, state).map(Self)
    }
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = authenticate(parts, state)?;
        if !user.is_admin {
            return Err(ApiError::Forbidden);
        }
        Ok(Self(user))
    }
}
