//! Bearer-token authentication shared by the API transports.

use jsonwebtoken::{DecodingKey, Validation, decode};
use nivaran_core::Role;
use nivaran_types::Secret;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Principal;

/// Claims carried by a Nivaran access token.
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject: the user id.
    pub sub: Uuid,
    /// The user's role at token issue time.
    pub role: Role,
    /// Expiry, seconds since the epoch.
    pub exp: usize,
}

/// Errors raised while authenticating a request.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The Authorization header did not carry a bearer token.
    #[error("Authorization header is not a bearer token")]
    NotBearer,
    /// The token failed signature, expiry or claim validation.
    #[error("invalid access token")]
    InvalidToken,
}

/// Authenticate an `Authorization` header value against the access secret.
///
/// Strips the `Bearer ` prefix and validates the token signature and expiry
/// (HS256). The decoded claims become the request principal.
///
/// # Errors
///
/// Returns [`AuthError::NotBearer`] when the header is not a bearer
/// credential, or [`AuthError::InvalidToken`] when validation fails. The
/// underlying decode error is deliberately not propagated: its detail
/// belongs in server logs, not in a response.
pub fn authenticate_bearer(header_value: &str, access_secret: &Secret) -> Result<Principal, AuthError> {
    let token = header_value
        .strip_prefix("Bearer ")
        .ok_or(AuthError::NotBearer)?;

    let data = decode::<AccessClaims>(
        token,
        &DecodingKey::from_secret(access_secret.expose().as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AuthError::InvalidToken)?;

    Ok(Principal {
        user_id: data.claims.sub,
        role: data.claims.role,
    })
}
