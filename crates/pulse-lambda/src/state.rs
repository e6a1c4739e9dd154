use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use pulse_auth::jwt::DecodingKey;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub s3: S3Client,
    pub bucket: String,
    pub auth: Arc<AuthSettings>,
}

/// Token-verification settings for the auth middleware.
pub struct AuthSettings {
    /// RS256 public key for Cognito tokens. When absent (local development),
    /// the bearer token itself is taken as the principal id, unverified.
    pub decoding_key: Option<DecodingKey>,
    pub user_pool_id: String,
    pub region: String,
}
