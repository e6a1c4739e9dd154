use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;

use crate::state::AppState;

/// Bearer-token middleware guarding every resource route.
///
/// Extracts the `Authorization: Bearer <token>` header, resolves it to a
/// principal, and inserts [`Principal`] into request extensions. A missing
/// or rejected token 401s here; no handler logic runs.
pub async fn require_principal(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let token = {
        let auth_header = req
            .headers()
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or(StatusCode::UNAUTHORIZED)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(StatusCode::UNAUTHORIZED)?;

        if token.is_empty() {
            return Err(StatusCode::UNAUTHORIZED);
        }

        token.to_string()
    };

    let sub = match &state.auth.decoding_key {
        Some(key) => {
            let claims = pulse_auth::jwt::validate_token(
                &token,
                key,
                &state.auth.user_pool_id,
                &state.auth.region,
            )
            .map_err(|e| {
                tracing::warn!(error = %e, "bearer token rejected");
                StatusCode::UNAUTHORIZED
            })?;
            claims.sub
        }
        // No verification key configured (local development): the raw
        // token is the principal id.
        None => token,
    };

    req.extensions_mut().insert(Principal { sub });

    Ok(next.run(req).await)
}

/// The verified principal for the current request.
#[derive(Clone, Debug)]
pub struct Principal {
    pub sub: String,
}
