use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use pulse_core::models::survey::{NewSurvey, Survey, SurveyPatch, SurveyWithResponses};
use pulse_core::ownership::authorize_owner;
use pulse_core::s3_keys;
use pulse_core::update::sanitize_update;
use pulse_storage::{documents, objects};

use crate::error::ApiError;
use crate::middleware::audit::AuditEvent;
use crate::middleware::auth::Principal;
use crate::routes::responses::responses_for_survey;
use crate::state::AppState;

#[derive(Serialize)]
pub struct SurveyIndexBody {
    pub surveys: Vec<Survey>,
}

#[derive(Serialize)]
pub struct SurveyShowBody {
    pub survey: SurveyWithResponses,
}

#[derive(Serialize)]
pub struct SurveyCreatedBody {
    pub survey: Survey,
}

#[derive(Deserialize)]
pub struct CreateSurveyBody {
    pub survey: NewSurvey,
}

#[derive(Deserialize)]
pub struct UpdateSurveyBody {
    pub survey: Map<String, Value>,
}

/// INDEX — GET /surveys. Unfiltered; listing is not ownership-gated.
pub async fn list_surveys(
    State(state): State<AppState>,
) -> Result<Json<SurveyIndexBody>, ApiError> {
    let surveys =
        documents::load_all(&state.s3, &state.bucket, s3_keys::SURVEYS_PREFIX).await?;
    Ok(Json(SurveyIndexBody { surveys }))
}

/// Load one survey and join in the responses that reference it.
///
/// The stored survey carries no responses list; the collection here is
/// built by scanning the responses prefix for matching foreign keys.
pub async fn compose_survey(
    state: &AppState,
    id: Uuid,
) -> Result<SurveyWithResponses, ApiError> {
    let survey: Survey =
        documents::load_doc(&state.s3, &state.bucket, &s3_keys::survey(id)).await?;
    let responses = responses_for_survey(state, id).await?;
    Ok(SurveyWithResponses { survey, responses })
}

/// SHOW — GET /surveys/{id}. 200 with the composed survey.
pub async fn get_survey(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SurveyShowBody>, ApiError> {
    let id = Uuid::parse_str(&id)?;
    let survey = compose_survey(&state, id).await?;
    Ok(Json(SurveyShowBody { survey }))
}

/// CREATE — POST /surveys. The owner is always the resolved principal,
/// never anything in the payload.
pub async fn create_survey(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<CreateSurveyBody>,
) -> Result<(StatusCode, Json<SurveyCreatedBody>), ApiError> {
    let survey = Survey::create(body.survey, &principal.sub)?;
    documents::save_doc(&state.s3, &state.bucket, &s3_keys::survey(survey.id), &survey)
        .await?;

    AuditEvent::new("create", "survey", survey.id, &principal.sub).emit();
    Ok((StatusCode::CREATED, Json(SurveyCreatedBody { survey })))
}

/// UPDATE — PATCH /surveys/{id}.
///
/// load → authorize → sanitize → validate → apply, in that order; the
/// first failure ends the request. A payload that sanitizes down to
/// nothing is a valid no-op and skips the write.
pub async fn update_survey(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
    Json(body): Json<UpdateSurveyBody>,
) -> Result<StatusCode, ApiError> {
    let id = Uuid::parse_str(&id)?;
    let key = s3_keys::survey(id);

    let mut survey: Survey = documents::load_doc(&state.s3, &state.bucket, &key).await?;
    authorize_owner(&principal.sub, &survey)?;

    let patch = SurveyPatch::from_sanitized(&sanitize_update(body.survey))?;
    if !patch.is_empty() {
        survey.apply(patch);
        documents::save_doc(&state.s3, &state.bucket, &key, &survey).await?;
    }

    AuditEvent::new("update", "survey", id, &principal.sub).emit();
    Ok(StatusCode::NO_CONTENT)
}

/// DESTROY — DELETE /surveys/{id}. Responses referencing the survey are
/// left in place; there is no cascade.
pub async fn delete_survey(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = Uuid::parse_str(&id)?;
    let key = s3_keys::survey(id);

    let survey: Survey = documents::load_doc(&state.s3, &state.bucket, &key).await?;
    authorize_owner(&principal.sub, &survey)?;

    objects::delete_object(&state.s3, &state.bucket, &key).await?;

    AuditEvent::new("delete", "survey", id, &principal.sub).emit();
    Ok(StatusCode::NO_CONTENT)
}
