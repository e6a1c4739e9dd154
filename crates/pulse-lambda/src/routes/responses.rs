use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use pulse_core::models::response::{NewResponse, ResponsePatch, SurveyResponse};
use pulse_core::models::survey::Survey;
use pulse_core::ownership::authorize_owner;
use pulse_core::s3_keys;
use pulse_core::update::sanitize_update;
use pulse_storage::{documents, objects};

use crate::error::ApiError;
use crate::middleware::audit::AuditEvent;
use crate::middleware::auth::Principal;
use crate::routes::surveys::{SurveyShowBody, compose_survey};
use crate::state::AppState;

#[derive(Serialize)]
pub struct ResponseIndexBody {
    pub responses: Vec<SurveyResponse>,
}

#[derive(Serialize)]
pub struct ResponseCreatedBody {
    pub response: SurveyResponse,
}

#[derive(Deserialize)]
pub struct CreateResponseBody {
    pub response: NewResponse,
}

#[derive(Deserialize)]
pub struct UpdateResponseBody {
    pub response: Map<String, Value>,
}

/// All responses whose `survey` foreign key equals `survey_id`.
///
/// The store has no secondary index; this is a prefix scan plus filter.
pub async fn responses_for_survey(
    state: &AppState,
    survey_id: Uuid,
) -> Result<Vec<SurveyResponse>, ApiError> {
    let all: Vec<SurveyResponse> =
        documents::load_all(&state.s3, &state.bucket, s3_keys::RESPONSES_PREFIX).await?;
    Ok(all.into_iter().filter(|r| r.survey == survey_id).collect())
}

/// INDEX — GET /responses. Unfiltered; listing is not ownership-gated.
pub async fn list_responses(
    State(state): State<AppState>,
) -> Result<Json<ResponseIndexBody>, ApiError> {
    let responses =
        documents::load_all(&state.s3, &state.bucket, s3_keys::RESPONSES_PREFIX).await?;
    Ok(Json(ResponseIndexBody { responses }))
}

/// SHOW — GET /responses/{id}, where `{id}` is a *survey* id.
///
/// Historical route shape: clients ask for a survey's responses through
/// the responses collection. Returns the same composed representation as
/// GET /surveys/{id}.
pub async fn show_survey_responses(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SurveyShowBody>, ApiError> {
    let id = Uuid::parse_str(&id)?;
    let survey = compose_survey(&state, id).await?;
    Ok(Json(SurveyShowBody { survey }))
}

/// CREATE — POST /responses.
///
/// The client supplies `surveyId`; the foreign-key reference on the stored
/// document is constructed here, and the referenced survey must exist at
/// creation time. No link is written back to the survey document.
pub async fn create_response(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<CreateResponseBody>,
) -> Result<(StatusCode, Json<ResponseCreatedBody>), ApiError> {
    let survey_id = Uuid::parse_str(&body.response.survey_id)?;

    let _: Survey =
        documents::load_doc(&state.s3, &state.bucket, &s3_keys::survey(survey_id)).await?;

    let response = SurveyResponse::create(body.response.value, survey_id, &principal.sub)?;
    documents::save_doc(
        &state.s3,
        &state.bucket,
        &s3_keys::response(response.id),
        &response,
    )
    .await?;

    AuditEvent::new("create", "response", response.id, &principal.sub).emit();
    Ok((StatusCode::CREATED, Json(ResponseCreatedBody { response })))
}

/// UPDATE — PATCH /responses/{id}.
pub async fn update_response(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
    Json(body): Json<UpdateResponseBody>,
) -> Result<StatusCode, ApiError> {
    let id = Uuid::parse_str(&id)?;
    let key = s3_keys::response(id);

    let mut response: SurveyResponse =
        documents::load_doc(&state.s3, &state.bucket, &key).await?;
    authorize_owner(&principal.sub, &response)?;

    let patch = ResponsePatch::from_sanitized(&sanitize_update(body.response))?;
    if !patch.is_empty() {
        response.apply(patch);
        documents::save_doc(&state.s3, &state.bucket, &key, &response).await?;
    }

    AuditEvent::new("update", "response", id, &principal.sub).emit();
    Ok(StatusCode::NO_CONTENT)
}

/// DESTROY — DELETE /responses/{id}.
pub async fn delete_response(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = Uuid::parse_str(&id)?;
    let key = s3_keys::response(id);

    let response: SurveyResponse =
        documents::load_doc(&state.s3, &state.bucket, &key).await?;
    authorize_owner(&principal.sub, &response)?;

    objects::delete_object(&state.s3, &state.bucket, &key).await?;

    AuditEvent::new("delete", "response", id, &principal.sub).emit();
    Ok(StatusCode::NO_CONTENT)
}
