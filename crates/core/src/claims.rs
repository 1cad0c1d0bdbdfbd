//! Bearer-token claims decoding.
//!
//! The upstream identity provider terminates authentication; this service
//! only needs the claims tuple out of the (already gateway-verified) access
//! token. Decoding is a pure function from token text to a [`Claims`]
//! value; no signature validation and no shared state across calls.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;

use crate::error::CoreError;

/// The resolved identity tuple the workflows operate on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Stable subject id (`oid` claim); primary key of the user account.
    pub subject: String,
    /// Display name (`name` claim).
    pub name: String,
    /// Email (`preferred_username` claim).
    pub email: String,
    /// True when the token carries any role assignment.
    pub is_admin: bool,
}

/// Error type for claims decoding. All variants surface as 401 upstream.
#[derive(Debug, thiserror::Error)]
pub enum ClaimsError {
    #[error("token is not a three-part JWT")]
    Malformed,

    #[error("token payload is not valid base64url")]
    Encoding,

    #[error("token payload is not valid JSON")]
    Payload,

    #[error("token payload is missing the {0} claim")]
    MissingClaim(&'static str),
}

impl From<ClaimsError> for CoreError {
    fn from(err: ClaimsError) -> Self {
        CoreError::Unauthorized(err.to_string())
    }
}

/// Raw payload shape; only the claims this service reads.
#[derive(Debug, Deserialize)]
struct RawClaims {
    oid: Option<String>,
    name: Option<String>,
    preferred_username: Option<String>,
    roles: Option<Vec<String>>,
}

/// Decode the claims tuple from a bearer token.
///
/// Accepts the bare compact-JWT text (no `Bearer ` prefix).
pub fn decode_claims(token: &str) -> Result<Claims, ClaimsError> {
    let payload = token.split('.').nth(1).ok_or(ClaimsError::Malformed)?;
    if token.split('.').count() != 3 {
        return Err(ClaimsError::Malformed);
    }

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|_| ClaimsError::Encoding)?;

    let raw: RawClaims = serde_json::from_slice(&bytes).map_err(|_| ClaimsError::Payload)?;

    Ok(Claims {
        subject: raw.oid.ok_or(ClaimsError::MissingClaim("oid"))?,
        name: raw.name.ok_or(ClaimsError::MissingClaim("name"))?,
        email: raw
            .preferred_username
            .ok_or(ClaimsError::MissingClaim("preferred_username"))?,
        is_admin: raw.roles.map_or(false, |roles| !roles.is_empty()),
    })
}
