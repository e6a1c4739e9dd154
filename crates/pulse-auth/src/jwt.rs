use jsonwebtoken::{Algorithm, Validation, decode};
use serde::Deserialize;

pub use jsonwebtoken::DecodingKey;

use crate::error::AuthError;

/// Build a decoding key from an RSA public key in PEM form.
pub fn decoding_key_from_rsa_pem(pem: &[u8]) -> Result<DecodingKey, AuthError> {
    Ok(DecodingKey::from_rsa_pem(pem)?)
}

/// Claims extracted from a Cognito JWT.
#[derive(Debug, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iss: String,
    pub token_use: String,
    pub exp: u64,
    pub iat: u64,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

/// Validate a Cognito JWT and return its claims.
///
/// Checks signature, expiry, and issuer against the given user pool, and
/// requires a `token_use` of `access` or `id`. Takes a pre-fetched public
/// key; fetching the JWKS is the caller's concern.
pub fn validate_token(
    token: &str,
    decoding_key: &DecodingKey,
    user_pool_id: &str,
    region: &str,
) -> Result<Claims, AuthError> {
    let issuer = format!("https://cognito-idp.{region}.amazonaws.com/{user_pool_id}");

    let mut validation = Validation::new(Algorithm::RS256);
    validation.set_issuer(&[&issuer]);
    validation.validate_exp = true;

    let token_data = decode::<Claims>(token, decoding_key, &validation)?;

    let token_use = &token_data.claims.token_use;
    if token_use != "access" && token_use != "id" {
        return Err(AuthError::InvalidToken(format!(
            "unexpected token_use: {token_use}"
        )));
    }

    Ok(token_data.claims)
}
