use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::ownership::Owned;
use crate::update::ValidationErrors;

/// A stored response document.
///
/// `survey` is an opaque foreign-key reference, set once at creation and
/// resolved by explicit lookup. Deleting a survey does not cascade here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyResponse {
    pub id: Uuid,
    pub value: Value,
    pub survey: Uuid,
    pub owner: String,
}

impl SurveyResponse {
    /// Build a new response to `survey`, owned by `owner`.
    ///
    /// The caller is responsible for checking that the referenced survey
    /// exists; this only validates the answer value itself.
    pub fn create(value: Value, survey: Uuid, owner: &str) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate_value(&value, &mut errors);
        errors.into_result()?;

        Ok(Self {
            id: Uuid::new_v4(),
            value,
            survey,
            owner: owner.to_string(),
        })
    }

    /// Apply a validated partial update.
    pub fn apply(&mut self, patch: ResponsePatch) {
        if let Some(value) = patch.value {
            self.value = value;
        }
    }
}

impl Owned for SurveyResponse {
    fn owner(&self) -> &str {
        &self.owner
    }

    fn resource_type(&self) -> &'static str {
        "response"
    }

    fn resource_id(&self) -> Uuid {
        self.id
    }
}

/// Client payload for POST /responses.
///
/// The target survey arrives as `surveyId`; the foreign-key reference on
/// the stored document is constructed server-side.
#[derive(Debug, Deserialize)]
pub struct NewResponse {
    pub value: Value,
    #[serde(rename = "surveyId")]
    pub survey_id: String,
}

/// The narrow, validated form of a sanitized response update.
///
/// Only `value` is mutable; `survey` and `id` keys in the payload are
/// ignored, and `owner` has already been stripped by the sanitizer.
#[derive(Debug, Default)]
pub struct ResponsePatch {
    pub value: Option<Value>,
}

impl ResponsePatch {
    pub fn from_sanitized(clean: &Map<String, Value>) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let mut patch = Self::default();

        if let Some(value) = clean.get("value") {
            validate_value(value, &mut errors);
            if errors.is_empty() {
                patch.value = Some(value.clone());
            }
        }

        errors.into_result()?;
        Ok(patch)
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }
}

/// Answer values are scalars: free text or the boolean/numeric shapes older
/// survey revisions produced.
fn validate_value(value: &Value, errors: &mut ValidationErrors) {
    match value {
        Value::String(_) | Value::Bool(_) | Value::Number(_) => {}
        _ => errors.add("value", "must be a string, boolean, or number"),
    }
}
