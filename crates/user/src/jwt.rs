use anyhow::{Context, Result};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::Role;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub role: Role,
    pub iat: u64,
    pub exp: u64,
}

/// Generate an HS256 token for a user, valid for `expiration_days`
pub fn generate_jwt(
    user_id: impl Into<String>,
    role: Role,
    secret: &str,
    expiration_days: u64,
) -> Result<String> {
    let now = u64::try_from(chrono::Utc::now().timestamp()).context("Invalid system time")?;

    let claims = Claims {
        sub: user_id.into(),
        role,
        iat: now,
        exp: now + expiration_days * 24 * 60 * 60,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .context("Failed to encode JWT")
}

/// Validate and decode a token
pub fn validate_jwt(token: &str, secret: &str) -> Result<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .context("Failed to decode JWT")?;

    Ok(token_data.claims)
}
