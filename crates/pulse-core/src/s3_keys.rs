//! S3 key/path conventions.
//!
//! Pure string functions — no AWS SDK dependency. These define the canonical
//! layout of objects in the Pulse bucket.

use uuid::Uuid;

pub const SURVEYS_PREFIX: &str = "surveys/";

pub const RESPONSES_PREFIX: &str = "responses/";

pub fn survey(id: Uuid) -> String {
    format!("surveys/{id}.json")
}

pub fn response(id: Uuid) -> String {
    format!("responses/{id}.json")
}
