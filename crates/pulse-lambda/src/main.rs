use std::env;
use std::sync::Arc;

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{delete, get, patch, post};
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

mod error;
mod middleware;
mod routes;
mod state;

use state::{AppState, AuthSettings};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let bucket = env::var("PULSE_BUCKET").unwrap_or_else(|_| "pulse".to_string());
    let user_pool_id =
        env::var("COGNITO_USER_POOL_ID").unwrap_or_else(|_| "us-east-1_placeholder".to_string());
    let region = env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string());

    // RS256 public key for bearer-token verification. Without one, tokens
    // pass through unverified (local development only).
    let decoding_key = match env::var("COGNITO_PUBLIC_KEY_PEM") {
        Ok(pem) => Some(
            pulse_auth::jwt::decoding_key_from_rsa_pem(pem.as_bytes())
                .map_err(|e| eyre::eyre!("invalid COGNITO_PUBLIC_KEY_PEM: {e}"))?,
        ),
        Err(_) => {
            tracing::warn!("COGNITO_PUBLIC_KEY_PEM not set, bearer tokens are not verified");
            None
        }
    };

    let s3 = pulse_storage::client::build_client().await;

    let state = AppState {
        s3,
        bucket,
        auth: Arc::new(AuthSettings {
            decoding_key,
            user_pool_id,
            region,
        }),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Every resource route requires a resolved principal.
    let resources = Router::new()
        .route("/surveys", get(routes::surveys::list_surveys))
        .route("/surveys", post(routes::surveys::create_survey))
        .route("/surveys/{id}", get(routes::surveys::get_survey))
        .route("/surveys/{id}", patch(routes::surveys::update_survey))
        .route("/surveys/{id}", delete(routes::surveys::delete_survey))
        .route("/responses", get(routes::responses::list_responses))
        .route("/responses", post(routes::responses::create_response))
        .route(
            "/responses/{id}",
            get(routes::responses::show_survey_responses),
        )
        .route("/responses/{id}", patch(routes::responses::update_response))
        .route(
            "/responses/{id}",
            delete(routes::responses::delete_response),
        )
        .route_layer(axum_mw::from_fn_with_state(
            state.clone(),
            middleware::auth::require_principal,
        ));

    let app = Router::new()
        // Health (no auth)
        .route("/health", get(routes::health::health_check))
        .merge(resources)
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state);

    lambda_http::run(app).await.map_err(|e| eyre::eyre!(e))
}
