//! Bearer token decoding.
//!
//! Tokens are issued by the external authentication provider; this module
//! only verifies the signature and lifts the claims into a [`Principal`].
//! The encode path exists for the provider shim and for tests.

use chrono::{Duration, Utc};
use hr_core::{HrError, HrResult};
use hr_models::Role;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::principal::Principal;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: i64,
    pub email: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Issue a token for the given principal.
pub fn issue_token(principal: &Principal, secret: &str, ttl_secs: i64) -> HrResult<String> {
    let now = Utc::now();
    let claims = Claims {
        sub: principal.user_id,
        email: principal.email.clone(),
        role: principal.role.as_str().to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::seconds(ttl_secs)).timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| HrError::Internal(format!("token encoding failed: {e}")))
}

/// Verify a token and extract the principal. Any failure (bad signature,
/// expiry, unknown role) denies authentication.
pub fn decode_token(token: &str, secret: &str) -> HrResult<Principal> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| HrError::unauthenticated(format!("invalid token: {e}")))?;

    let role = Role::from_str(&data.claims.role)
        .ok_or_else(|| HrError::unauthenticated("invalid token: unknown role"))?;

    Ok(Principal::new(data.claims.sub, data.claims.email, role))
}
