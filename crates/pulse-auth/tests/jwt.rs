//! Token validation rejects anything that is not a well-formed, RS256-signed
//! Cognito token. Accepting a real token requires the pool's public key and
//! is covered by the deployed environment, not here.

use jsonwebtoken::{EncodingKey, Header, encode};
use serde::Serialize;

use pulse_auth::jwt::{DecodingKey, decoding_key_from_rsa_pem, validate_token};

const POOL: &str = "us-east-1_testpool";
const REGION: &str = "us-east-1";

#[derive(Serialize)]
struct TestClaims {
    sub: String,
    iss: String,
    token_use: String,
    exp: u64,
    iat: u64,
}

#[test]
fn garbage_tokens_are_rejected() {
    let key = DecodingKey::from_secret(b"secret");
    assert!(validate_token("not.a.jwt", &key, POOL, REGION).is_err());
    assert!(validate_token("", &key, POOL, REGION).is_err());
}

#[test]
fn tokens_signed_with_the_wrong_algorithm_are_rejected() {
    let claims = TestClaims {
        sub: "user-1".to_string(),
        iss: format!("https://cognito-idp.{REGION}.amazonaws.com/{POOL}"),
        token_use: "access".to_string(),
        exp: 4_102_444_800, // far future
        iat: 0,
    };

    // HS256, while the validator insists on RS256.
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"secret"),
    )
    .expect("encodes");

    let key = DecodingKey::from_secret(b"secret");
    assert!(validate_token(&token, &key, POOL, REGION).is_err());
}

#[test]
fn invalid_pem_is_rejected() {
    assert!(decoding_key_from_rsa_pem(b"not a pem").is_err());
}
