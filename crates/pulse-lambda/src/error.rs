use std::collections::BTreeMap;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use pulse_core::ownership::OwnershipError;
use pulse_core::update::ValidationErrors;
use pulse_storage::error::StorageError;

/// Unified API error type for all route handlers.
///
/// The single place HTTP statuses are decided: every failure a handler can
/// hit converts into one of these variants via `?` and short-circuits the
/// rest of the pipeline. 4xx bodies are empty except for `Validation`.
#[derive(Debug)]
pub enum ApiError {
    /// Lookup by id found no document.
    NotFound,
    /// The ownership guard rejected the principal.
    NotOwned,
    /// The supplied id is not a well-formed UUID.
    MalformedId,
    /// A required-field or type constraint failed.
    Validation(ValidationErrors),
    /// Anything else; detail goes to the log, never to the client.
    Internal(String),
}

#[derive(Serialize)]
struct ValidationBody {
    errors: BTreeMap<String, Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND.into_response(),
            ApiError::NotOwned => StatusCode::UNAUTHORIZED.into_response(),
            ApiError::MalformedId => StatusCode::BAD_REQUEST.into_response(),
            ApiError::Validation(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ValidationBody { errors: e.errors }),
            )
                .into_response(),
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound { key } => {
                tracing::debug!(key = %key, "document not found");
                ApiError::NotFound
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<OwnershipError> for ApiError {
    fn from(e: OwnershipError) -> Self {
        tracing::warn!(
            resource_type = e.resource_type,
            resource_id = %e.resource_id,
            principal = %e.principal,
            "ownership check rejected"
        );
        ApiError::NotOwned
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(e: ValidationErrors) -> Self {
        ApiError::Validation(e)
    }
}

impl From<uuid::Error> for ApiError {
    fn from(_: uuid::Error) -> Self {
        ApiError::MalformedId
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use uuid::Uuid;

    async fn status_and_body(err: ApiError) -> (StatusCode, Vec<u8>) {
        let resp = err.into_response();
        let status = resp.status();
        let body = to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn not_found_is_404_with_empty_body() {
        let (status, body) = status_and_body(ApiError::NotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn not_owned_is_401_with_empty_body() {
        let (status, body) = status_and_body(ApiError::NotOwned).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn malformed_id_is_400_with_empty_body() {
        let (status, body) = status_and_body(ApiError::MalformedId).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn internal_is_500_with_empty_body() {
        let (status, body) = status_and_body(ApiError::Internal("boom".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn validation_is_422_with_field_messages() {
        let mut errors = ValidationErrors::new();
        errors.add("question", "is required");
        let (status, body) = status_and_body(ApiError::Validation(errors)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let parsed: serde_json::Value =
            serde_json::from_slice(&body).expect("422 body should be JSON");
        assert_eq!(parsed["errors"]["question"][0], "is required");
    }

    #[test]
    fn absent_store_document_classifies_as_not_found() {
        let err = ApiError::from(StorageError::NotFound {
            key: "surveys/x.json".into(),
        });
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn other_store_failures_classify_as_internal() {
        let err = ApiError::from(StorageError::GetObject("timeout".into()));
        assert!(matches!(err, ApiError::Internal(_)));
    }

    #[test]
    fn ownership_rejection_classifies_as_not_owned() {
        let err = ApiError::from(OwnershipError {
            principal: "u2".into(),
            resource_type: "survey",
            resource_id: Uuid::new_v4(),
        });
        assert!(matches!(err, ApiError::NotOwned));
    }

    #[test]
    fn bad_uuid_classifies_as_malformed_id() {
        let err = ApiError::from(Uuid::parse_str("not-a-uuid").unwrap_err());
        assert!(matches!(err, ApiError::MalformedId));
    }
}
