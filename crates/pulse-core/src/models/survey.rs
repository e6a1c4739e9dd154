use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::models::response::SurveyResponse;
use crate::ownership::Owned;
use crate::update::ValidationErrors;

/// A stored survey document.
///
/// The stored form carries no responses list. The authoritative linkage is
/// the `survey` foreign key on each response; the composed view is a
/// read-time join (see [`SurveyWithResponses`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Survey {
    pub id: Uuid,
    pub question: String,
    pub owner: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Survey {
    /// Build a new survey owned by `owner`.
    ///
    /// The owner is always the resolved principal, never client input, and
    /// is set exactly once here.
    pub fn create(new: NewSurvey, owner: &str) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if new.question.trim().is_empty() {
            errors.add("question", "is required");
        }
        errors.into_result()?;

        let now = Timestamp::now();
        Ok(Self {
            id: Uuid::new_v4(),
            question: new.question,
            owner: owner.to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply a validated partial update and bump `updated_at`.
    pub fn apply(&mut self, patch: SurveyPatch) {
        if let Some(question) = patch.question {
            self.question = question;
        }
        self.updated_at = Timestamp::now();
    }
}

impl Owned for Survey {
    fn owner(&self) -> &str {
        &self.owner
    }

    fn resource_type(&self) -> &'static str {
        "survey"
    }

    fn resource_id(&self) -> Uuid {
        self.id
    }
}

/// Client payload for POST /surveys.
#[derive(Debug, Deserialize)]
pub struct NewSurvey {
    pub question: String,
}

/// The narrow, validated form of a sanitized survey update.
///
/// Unknown keys in the sanitized payload are ignored; `question` must be a
/// string if present. `owner` never appears here — the sanitizer has
/// already stripped it.
#[derive(Debug, Default)]
pub struct SurveyPatch {
    pub question: Option<String>,
}

impl SurveyPatch {
    pub fn from_sanitized(clean: &Map<String, Value>) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let mut patch = Self::default();

        if let Some(value) = clean.get("question") {
            match value {
                Value::String(s) => patch.question = Some(s.clone()),
                _ => errors.add("question", "must be a string"),
            }
        }

        errors.into_result()?;
        Ok(patch)
    }

    pub fn is_empty(&self) -> bool {
        self.question.is_none()
    }
}

/// Read-time composition of a survey and the responses that reference it.
#[derive(Debug, Serialize)]
pub struct SurveyWithResponses {
    #[serde(flatten)]
    pub survey: Survey,
    pub responses: Vec<SurveyResponse>,
}
